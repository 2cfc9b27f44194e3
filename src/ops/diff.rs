//! Attribution of settings to the requested package targets.
//!
//! The dependent model minus the control model leaves exactly what linking
//! the external targets added: anything the baseline already needed, such as
//! default toolchain flags and platform defines, cancels out.

use crate::core::naming::strip_synthetic_prefix;
use crate::core::{DependenciesInfo, ExtractedConfiguration};
use crate::errors::{ExtractError, Result};

/// Field-wise `dependent - control` for every configuration and target of
/// `dependent`, with synthetic prefixes stripped from the target keys.
///
/// Both models must come from congruent projects: a configuration or target
/// of `dependent` without a control counterpart is an
/// [`ExtractError::InternalConsistency`].
pub fn diff(dependent: &DependenciesInfo, control: &DependenciesInfo) -> Result<DependenciesInfo> {
    let mut result = DependenciesInfo::default();

    for (config_name, dependent_config) in &dependent.configurations {
        let control_config = control.configurations.get(config_name).ok_or_else(|| {
            ExtractError::InternalConsistency {
                detail: format!("configuration `{}` missing from the control model", config_name),
            }
        })?;

        let mut delta = ExtractedConfiguration::new(config_name.clone());
        for (target_name, dependent_target) in &dependent_config.targets {
            let control_target = control_config.targets.get(target_name).ok_or_else(|| {
                ExtractError::InternalConsistency {
                    detail: format!(
                        "target `{}` of configuration `{}` missing from the control model",
                        target_name, config_name
                    ),
                }
            })?;

            let key = strip_synthetic_prefix(target_name).to_string();
            if delta.targets.contains_key(&key) {
                return Err(ExtractError::InternalConsistency {
                    detail: format!("target `{}` reported twice after prefix stripping", key),
                });
            }

            let target = dependent_target.difference(control_target, key.clone());
            delta.targets.insert(key, target);
        }

        result.configurations.insert(config_name.clone(), delta);
    }

    Ok(result)
}
