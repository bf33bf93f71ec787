//! First-run setup form.

use crate::domain::foundation::ValidationError;
use crate::domain::personality::PersonalityCode;

use super::snapshot::{PreferencePatch, PreferenceSnapshot};

/// The values collected before normal use is unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    pub my_name: String,
    pub my_type: PersonalityCode,
    pub partner_name: String,
    pub partner_type: PersonalityCode,
    pub relationship_tag: String,
}

impl SetupForm {
    /// Prefills the form from the current snapshot.
    pub fn from_snapshot(snapshot: &PreferenceSnapshot) -> Self {
        Self {
            my_name: snapshot.my_name.clone(),
            my_type: snapshot.my_type,
            partner_name: snapshot.partner_name.clone(),
            partner_type: snapshot.partner_type,
            relationship_tag: snapshot.relationship_tag.clone(),
        }
    }

    /// Both names and the relationship tag are required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.my_name.trim().is_empty() {
            return Err(ValidationError::empty_field("my_name"));
        }
        if self.partner_name.trim().is_empty() {
            return Err(ValidationError::empty_field("partner_name"));
        }
        if self.relationship_tag.trim().is_empty() {
            return Err(ValidationError::empty_field("relationship_tag"));
        }
        Ok(())
    }

    /// Validates and converts the form into a patch that completes setup.
    pub fn into_patch(self) -> Result<PreferencePatch, ValidationError> {
        self.validate()?;
        Ok(PreferencePatch::new()
            .with_my_name(self.my_name.trim())
            .with_my_type(self.my_type)
            .with_partner_name(self.partner_name.trim())
            .with_partner_type(self.partner_type)
            .with_relationship_tag(self.relationship_tag.trim())
            .with_setup_complete(true))
    }
}
