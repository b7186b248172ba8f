//! Custom assertion macros
//!
//! Shorthand for the two failure outcomes of a gated operation.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a gated operation was refused for lack of a credential
#[macro_export]
macro_rules! assert_auth_required {
    ($result:expr) => {
        match $result {
            Err(userdesk::shared::ClientError::AuthRequired) => {}
            Ok(value) => panic!("Expected AuthRequired, got Ok: {:?}", value),
            Err(e) => panic!("Expected AuthRequired, got: {:?}", e),
        }
    };
}

/// Assert that a gated operation failed after being sent, returning the detail
#[macro_export]
macro_rules! assert_request_failed {
    ($result:expr) => {
        match $result {
            Err(userdesk::shared::ClientError::RequestFailed(failure)) => failure,
            Ok(value) => panic!("Expected RequestFailed, got Ok: {:?}", value),
            Err(e) => panic!("Expected RequestFailed, got: {:?}", e),
        }
    };
}
