use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (by extension) and deserialise into a typed struct.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let is_yaml = canonical
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let value: T = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    tracing::debug!(path = %canonical.display(), yaml = is_yaml, "input document loaded");
    Ok(value)
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }
    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wealthcalc_core::goals::ledger::GoalLedger;
    use wealthcalc_core::goals::progress::GoalProgressInput;
    use wealthcalc_core::investments::sip::SipInput;

    fn write_temp(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("wcalc-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_yaml_document_by_extension() {
        let path = write_temp(
            "sip.yaml",
            "monthly_investment: 5000\nannual_return_rate: 12\nduration_in_years: 10\n",
        );
        let input: SipInput = read_document(&path).unwrap();
        assert_eq!(input.monthly_investment, dec!(5000));
        assert_eq!(input.step_up_percentage, dec!(0));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_json_document() {
        let path = write_temp(
            "sip.json",
            r#"{"monthly_investment":"2500","annual_return_rate":"9.5","duration_in_years":5,"step_up_percentage":"10"}"#,
        );
        let input: SipInput = read_document(&path).unwrap();
        assert_eq!(input.annual_return_rate, dec!(9.5));
        assert_eq!(input.step_up_percentage, dec!(10));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_reported() {
        let err = read_document::<SipInput>("/nonexistent/wcalc.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_ledger_yaml_without_history() {
        let path = write_temp(
            "ledger.yaml",
            "goals:\n  - id: car\n    name: Car\n    target_amount: 20000\n    start_date: 2024-01-01\n    target_date: 2026-01-01\nsavings:\n  - id: s1\n    goal_id: car\n    amount: 5000\n    date: 2024-06-01\n",
        );
        let ledger: GoalLedger = read_document(&path).unwrap();
        assert_eq!(ledger.totals("car").unwrap().net, dec!(5000));
        assert_eq!(ledger.history_for("car").len(), 1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_ledger_with_orphan_saving_fails_to_load() {
        let path = write_temp(
            "orphan.json",
            r#"{"savings":[{"id":"s1","goal_id":"boat","amount":"10","date":"2024-06-01"}]}"#,
        );
        let err = read_document::<GoalLedger>(&path).unwrap_err();
        assert!(err.to_string().contains("unknown goal boat"), "got {err}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_progress_document_without_as_of() {
        let path = write_temp(
            "progress.json",
            r#"{"target_amount":"100000","total_savings":"40000","start_date":"2024-01-01","target_date":"2030-01-01"}"#,
        );
        let input: GoalProgressInput = read_document(&path).unwrap();
        assert!(input.as_of > input.start_date);
        let _ = fs::remove_file(path);
    }
}
