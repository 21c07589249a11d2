use alarmctl_cloud::BackendError;
use alarmctl_core::CoreError;

/// Failure that aborts the provisioning sequence.
///
/// Alarms created before the failure are left in place; rerunning the
/// whole sequence overwrites them by name.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
