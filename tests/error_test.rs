use std::io;

use promptgen::error::PromptgenError;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: PromptgenError = io_err.into();

    match err {
        PromptgenError::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(PromptgenError::from(json_err), PromptgenError::JsonError(_)));
}

#[test]
fn test_error_display() {
    let err = PromptgenError::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = PromptgenError::PromptNotFound { id: 3 };
    assert_eq!(err.to_string(), "Prompt with id 3 not found.");

    let err = PromptgenError::AssignmentError {
        assignment: "oops".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid variable assignment 'oops': expected NAME=VALUE."
    );

    let err = PromptgenError::TooManyCombinations {
        count: 1000,
        limit: 100,
    };
    assert_eq!(
        err.to_string(),
        "Expansion would produce 1000 prompts, more than the configured limit of 100."
    );
}
