use crate::i18n::Catalog;

use super::registry::RuleError;

/// Maps locale-ambiguous separators onto a dot-decimal literal.
///
/// - a comma without any dot is a decimal comma: `12,5` → `12.5`
/// - with both present every comma becomes a dot first: `100,000.00` → `100.000.00`
/// - of several dots only the last survives: `100.000.00` → `100000.00`
pub fn normalize_number(raw: &str) -> String {
    let mut arg = raw.trim().to_string();
    if arg.contains(',') {
        arg = arg.replace(',', ".");
    }
    let dots = arg.matches('.').count();
    if dots > 1 {
        let mut remaining = dots - 1;
        arg = arg
            .chars()
            .filter(|c| {
                if *c == '.' && remaining > 0 {
                    remaining -= 1;
                    return false;
                }
                true
            })
            .collect();
    }
    arg
}

/// Checks `raw` against the symmetric bound `[-limit, +limit]`.
/// An empty value passes; emptiness is `must`'s concern.
pub fn check_range(catalog: &Catalog, lang: &str, raw: &str, limit: f64) -> Result<(), RuleError> {
    if raw.trim().is_empty() {
        return Ok(());
    }
    let arg = normalize_number(raw);
    let value = match arg.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Err(RuleError::new(catalog.trf("not_a_number", lang, &[&arg]))),
    };
    if value > limit {
        tracing::debug!(value, limit, "value above range");
        let bound = format!("{:.0}", limit);
        return Err(RuleError::new(catalog.trf("too_big", lang, &[&bound])));
    }
    if value < -limit {
        tracing::debug!(value, limit = -limit, "value below range");
        let bound = format!("{:.0}", -limit);
        return Err(RuleError::new(catalog.trf("too_small", lang, &[&bound])));
    }
    Ok(())
}
