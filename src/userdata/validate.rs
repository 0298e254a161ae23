//! Credential validation

use super::types::{CredentialGroup, CredentialPair};
use crate::UserDataError;
use tracing::debug;

/// Check pairs in order and report the first incomplete one
pub fn validate_pairs<'a>(
    input: &'static str,
    pairs: impl IntoIterator<Item = (CredentialGroup, &'a CredentialPair)>,
) -> Result<(), UserDataError> {
    for (group, pair) in pairs {
        if !pair.is_valid() {
            debug!("{} is missing {} cert/key", input, group);
            return Err(UserDataError::MissingCredential { group, input });
        }
    }
    Ok(())
}
