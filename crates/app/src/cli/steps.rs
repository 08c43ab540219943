use std::io;

use jam3a::{
    locale::Language,
    wizard::{Wizard, WizardError, WizardForm, WizardStep},
};

use crate::cli::{output_failed, render};

/// Walk `wizard` to its last step, printing each step as it passes.
///
/// Stops at the first step whose fields fail and prints what is missing.
pub(crate) fn walk_to_review<F: WizardForm>(
    wizard: &mut Wizard<F>,
    out: &mut impl io::Write,
    language: Language,
) -> Result<(), String> {
    let count = wizard.step_count();

    loop {
        let Some(step) = wizard.current_step() else {
            return Err("wizard is not editing".to_string());
        };

        let position = wizard.step_index().saturating_add(1);

        if wizard.is_last_step() {
            return writeln!(out, "[{position}/{count}] {}", step.title(language))
                .map_err(output_failed);
        }

        match wizard.forward() {
            Ok(_) => {
                writeln!(out, "[{position}/{count}] {} ✓", step.title(language))
                    .map_err(output_failed)?;
            }
            Err(WizardError::Invalid { errors, .. }) => {
                writeln!(out, "[{position}/{count}] {} ✗", step.title(language))
                    .map_err(output_failed)?;
                render::write_field_errors(out, &errors, language).map_err(output_failed)?;

                return Err(format!("step {} is incomplete", step.name()));
            }
            Err(error) => return Err(error.to_string()),
        }
    }
}

/// Print why a submission was refused locally.
pub(crate) fn report_refusal(
    error: &WizardError,
    out: &mut impl io::Write,
    language: Language,
) -> Result<(), String> {
    if let WizardError::Invalid { errors, .. } = error {
        render::write_field_errors(out, errors, language).map_err(output_failed)?;
    }

    Ok(())
}
