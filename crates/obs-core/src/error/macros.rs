//! Error macros for obs

/// Return early with a usage error
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::ObsError::UsageError($msg.to_string()))
    };
}
