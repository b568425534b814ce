//! Field-path diff computation.
//!
//! [`diff_field`] classifies one selector; [`compute_report`] runs every
//! configured selector and collects the results; [`diff_values`] and
//! [`diff`] apply the single-result return contract on top.

use crate::diff::model::{DiffError, DiffOutcome, DiffReport, FieldChange, FieldError, ObjectSide};
use crate::kdelta_core_types::schema::{OP_DIFF, OP_DIFF_FIELD};
use crate::selector::Selector;
use crate::settings::UpdateSetting;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Compare one selector across two snapshots.
///
/// The selector is parsed once; a syntax error is reported against the old
/// snapshot, which is the first one it would have been evaluated against.
/// Values are compared by their canonical rendering, so a field that is
/// absent on both sides is unchanged, and a field absent on only one side is
/// reported with `<none>` on that side.
pub fn diff_field(old: &Value, new: &Value, selector: &str) -> DiffOutcome {
    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(cause) => {
            return DiffOutcome::Errors(vec![FieldError::new(selector, ObjectSide::Old, cause)])
        }
    };
    let old_result = parsed.evaluate(old);
    let new_result = parsed.evaluate(new);

    if !old_result.is_found() && !new_result.is_found() {
        return DiffOutcome::NoChange;
    }

    let old_rendered = old_result.render();
    let new_rendered = new_result.render();
    if old_rendered == new_rendered {
        DiffOutcome::NoChange
    } else {
        DiffOutcome::Changed(FieldChange {
            path: selector.to_string(),
            old_rendered,
            new_rendered,
        })
    }
}

/// Run every configured selector, in order, and collect all changes and errors.
///
/// A failing selector never stops the selectors after it.
pub fn compute_report(old: &Value, new: &Value, settings: &UpdateSetting) -> DiffReport {
    let mut report = DiffReport::default();

    for selector in &settings.fields {
        let outcome = diff_field(old, new, selector);
        let label = match &outcome {
            DiffOutcome::NoChange => "no_change",
            DiffOutcome::Changed(_) => "changed",
            DiffOutcome::Errors(_) => "error",
        };
        tracing::debug!(
            component = module_path!(),
            op = OP_DIFF_FIELD,
            selector = selector.as_str(),
            outcome = label,
        );

        match outcome {
            DiffOutcome::NoChange => {}
            DiffOutcome::Changed(change) => report.changes.push(change),
            DiffOutcome::Errors(errors) => report.errors.extend(errors),
        }
    }

    report
}

/// Diff two canonical value trees.
///
/// Returns an empty string when no selector changed, otherwise the diff block
/// of the first changed selector.
///
/// # Errors
///
/// Returns [`DiffError::Fields`] when any selector failed to parse. Errors
/// take precedence over detected changes.
pub fn diff_values(old: &Value, new: &Value, settings: &UpdateSetting) -> Result<String, DiffError> {
    let started = Instant::now();
    log_op_start!(OP_DIFF, selector_count = settings.fields.len());

    let report = compute_report(old, new, settings);
    let changed_count = report.changes.len();
    let error_count = report.errors.len();
    let result = report.into_text();

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(_) => log_op_end!(
            OP_DIFF,
            duration_ms = duration_ms,
            changed_count = changed_count,
            error_count = error_count
        ),
        Err(err) => log_op_error!(
            OP_DIFF,
            err,
            duration_ms = duration_ms,
            changed_count = changed_count,
            error_count = error_count
        ),
    }

    result
}

/// Diff any two serializable snapshots.
///
/// Both snapshots are converted to `serde_json::Value` first, then handled by
/// [`diff_values`].
///
/// # Errors
///
/// Returns [`DiffError::Conversion`] if a snapshot cannot be serialized, and
/// [`DiffError::Fields`] as described on [`diff_values`].
pub fn diff<T>(old: &T, new: &T, settings: &UpdateSetting) -> Result<String, DiffError>
where
    T: Serialize + ?Sized,
{
    let old = serde_json::to_value(old).map_err(|source| DiffError::Conversion {
        side: ObjectSide::Old,
        source,
    })?;
    let new = serde_json::to_value(new).map_err(|source| DiffError::Conversion {
        side: ObjectSide::New,
        source,
    })?;
    diff_values(&old, &new, settings)
}
