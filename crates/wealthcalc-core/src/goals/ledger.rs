//! In-memory goal ledger: goals with their linked savings, debts and an
//! append-only history of inserts.
//!
//! Storage is keyed by caller-supplied string ids. Removing a goal removes
//! everything that references it.
//!
//! A ledger serializes as a [`LedgerDocument`] of plain record lists and is
//! rebuilt through the same inserts on load, so a stored document cannot
//! carry orphans, duplicate ids or non-positive amounts past deserialization.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::progress::{evaluate_goal_progress, GoalProgress, GoalProgressInput};
use crate::error::WealthCalcError;
use crate::time_value::checked;
use crate::types::{ComputationOutput, Money};
use crate::WealthCalcResult;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Money,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
}

/// A dated amount booked against a goal. Savings and debts share the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub goal_id: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

pub type Saving = Entry;
pub type Debt = Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Saving,
    Debt,
}

impl EntryKind {
    fn entity(self) -> &'static str {
        match self {
            EntryKind::Saving => "saving",
            EntryKind::Debt => "debt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub goal_id: String,
    pub kind: EntryKind,
    pub amount: Money,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalTotals {
    pub savings: Money,
    pub debts: Money,
    pub net: Money,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(try_from = "LedgerDocument", into = "LedgerDocument")]
pub struct GoalLedger {
    goals: BTreeMap<String, Goal>,
    savings: BTreeMap<String, Entry>,
    debts: BTreeMap<String, Entry>,
    history: Vec<HistoryEntry>,
    next_history_id: u64,
}

impl GoalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Goals ---------------------------------------------------------------

    pub fn add_goal(&mut self, goal: Goal) -> WealthCalcResult<()> {
        validate_goal(&goal)?;
        if self.goals.contains_key(&goal.id) {
            return Err(WealthCalcError::DuplicateId {
                entity: "goal".into(),
                id: goal.id,
            });
        }
        tracing::debug!(id = %goal.id, "goal added");
        self.goals.insert(goal.id.clone(), goal);
        Ok(())
    }

    pub fn get_goal(&self, id: &str) -> WealthCalcResult<&Goal> {
        self.goals.get(id).ok_or_else(|| not_found("goal", id))
    }

    pub fn list_goals(&self) -> Vec<&Goal> {
        self.goals.values().collect()
    }

    pub fn update_goal(&mut self, goal: Goal) -> WealthCalcResult<()> {
        validate_goal(&goal)?;
        let slot = self
            .goals
            .get_mut(&goal.id)
            .ok_or_else(|| not_found("goal", &goal.id))?;
        *slot = goal;
        Ok(())
    }

    /// Remove a goal with all of its savings, debts and history.
    pub fn delete_goal(&mut self, id: &str) -> WealthCalcResult<Goal> {
        let goal = self.goals.remove(id).ok_or_else(|| not_found("goal", id))?;
        self.savings.retain(|_, s| s.goal_id != id);
        self.debts.retain(|_, d| d.goal_id != id);
        self.history.retain(|h| h.goal_id != id);
        tracing::debug!(id, "goal deleted with linked records");
        Ok(goal)
    }

    // -- Savings / debts -------------------------------------------------------

    pub fn add_saving(&mut self, saving: Saving) -> WealthCalcResult<()> {
        self.add_entry(EntryKind::Saving, saving)
    }

    pub fn add_debt(&mut self, debt: Debt) -> WealthCalcResult<()> {
        self.add_entry(EntryKind::Debt, debt)
    }

    pub fn get_saving(&self, id: &str) -> WealthCalcResult<&Saving> {
        self.get_entry(EntryKind::Saving, id)
    }

    pub fn get_debt(&self, id: &str) -> WealthCalcResult<&Debt> {
        self.get_entry(EntryKind::Debt, id)
    }

    pub fn savings_for(&self, goal_id: &str) -> Vec<&Saving> {
        self.savings.values().filter(|s| s.goal_id == goal_id).collect()
    }

    pub fn debts_for(&self, goal_id: &str) -> Vec<&Debt> {
        self.debts.values().filter(|d| d.goal_id == goal_id).collect()
    }

    pub fn update_saving(&mut self, saving: Saving) -> WealthCalcResult<()> {
        self.update_entry(EntryKind::Saving, saving)
    }

    pub fn update_debt(&mut self, debt: Debt) -> WealthCalcResult<()> {
        self.update_entry(EntryKind::Debt, debt)
    }

    pub fn delete_saving(&mut self, id: &str) -> WealthCalcResult<Saving> {
        self.delete_entry(EntryKind::Saving, id)
    }

    pub fn delete_debt(&mut self, id: &str) -> WealthCalcResult<Debt> {
        self.delete_entry(EntryKind::Debt, id)
    }

    // -- History / aggregates ----------------------------------------------------

    pub fn history_for(&self, goal_id: &str) -> Vec<&HistoryEntry> {
        self.history.iter().filter(|h| h.goal_id == goal_id).collect()
    }

    pub fn totals(&self, goal_id: &str) -> WealthCalcResult<GoalTotals> {
        self.get_goal(goal_id)?;
        let savings = sum_amounts(&self.savings_for(goal_id), "goal savings total")?;
        let debts = sum_amounts(&self.debts_for(goal_id), "goal debts total")?;
        Ok(GoalTotals {
            savings,
            debts,
            net: savings - debts,
        })
    }

    /// Progress of a stored goal as of `as_of`.
    pub fn progress(
        &self,
        goal_id: &str,
        as_of: NaiveDate,
    ) -> WealthCalcResult<ComputationOutput<GoalProgress>> {
        let goal = self.get_goal(goal_id)?;
        let totals = self.totals(goal_id)?;
        evaluate_goal_progress(&GoalProgressInput {
            target_amount: goal.target_amount,
            total_savings: totals.savings,
            total_debts: totals.debts,
            start_date: goal.start_date,
            target_date: goal.target_date,
            as_of,
        })
    }

    // -- Internals -------------------------------------------------------------

    fn entries(&self, kind: EntryKind) -> &BTreeMap<String, Entry> {
        match kind {
            EntryKind::Saving => &self.savings,
            EntryKind::Debt => &self.debts,
        }
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut BTreeMap<String, Entry> {
        match kind {
            EntryKind::Saving => &mut self.savings,
            EntryKind::Debt => &mut self.debts,
        }
    }

    fn require_goal_for(&self, kind: EntryKind, entry: &Entry) -> WealthCalcResult<()> {
        if !self.goals.contains_key(&entry.goal_id) {
            return Err(WealthCalcError::ReferentialIntegrity(format!(
                "{} {} references unknown goal {}",
                kind.entity(),
                entry.id,
                entry.goal_id
            )));
        }
        Ok(())
    }

    fn add_entry(&mut self, kind: EntryKind, entry: Entry) -> WealthCalcResult<()> {
        validate_entry(kind, &entry)?;
        self.require_goal_for(kind, &entry)?;
        if self.entries(kind).contains_key(&entry.id) {
            return Err(WealthCalcError::DuplicateId {
                entity: kind.entity().into(),
                id: entry.id,
            });
        }

        self.next_history_id += 1;
        self.history.push(HistoryEntry {
            id: self.next_history_id,
            goal_id: entry.goal_id.clone(),
            kind,
            amount: entry.amount,
            date: entry.date,
        });
        self.entries_mut(kind).insert(entry.id.clone(), entry);
        Ok(())
    }

    fn get_entry(&self, kind: EntryKind, id: &str) -> WealthCalcResult<&Entry> {
        self.entries(kind)
            .get(id)
            .ok_or_else(|| not_found(kind.entity(), id))
    }

    fn update_entry(&mut self, kind: EntryKind, entry: Entry) -> WealthCalcResult<()> {
        validate_entry(kind, &entry)?;
        self.require_goal_for(kind, &entry)?;
        let slot = self
            .entries_mut(kind)
            .get_mut(&entry.id)
            .ok_or_else(|| not_found(kind.entity(), &entry.id))?;
        *slot = entry;
        Ok(())
    }

    fn delete_entry(&mut self, kind: EntryKind, id: &str) -> WealthCalcResult<Entry> {
        self.entries_mut(kind)
            .remove(id)
            .ok_or_else(|| not_found(kind.entity(), id))
    }

    /// Swap the replayed history for a stored one. Ids must strictly
    /// increase and every row must point at a known goal.
    fn restore_history(&mut self, history: Vec<HistoryEntry>) -> WealthCalcResult<()> {
        let mut last_id = 0;
        for row in &history {
            if row.id <= last_id {
                return Err(WealthCalcError::InvalidInput {
                    field: "history".into(),
                    reason: format!("history id {} does not follow {}", row.id, last_id),
                });
            }
            if !self.goals.contains_key(&row.goal_id) {
                return Err(WealthCalcError::ReferentialIntegrity(format!(
                    "history {} references unknown goal {}",
                    row.id, row.goal_id
                )));
            }
            if row.amount <= Decimal::ZERO {
                return Err(WealthCalcError::InvalidInput {
                    field: "history".into(),
                    reason: format!("history {} amount must be > 0", row.id),
                });
            }
            last_id = row.id;
        }
        self.history = history;
        self.next_history_id = last_id;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stored form
// ---------------------------------------------------------------------------

/// Serialized shape of a [`GoalLedger`]. Every list may be omitted.
///
/// Without `history`, loading replays savings and debts in date order and
/// numbers the history from 1.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub savings: Vec<Saving>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl TryFrom<LedgerDocument> for GoalLedger {
    type Error = WealthCalcError;

    fn try_from(doc: LedgerDocument) -> WealthCalcResult<Self> {
        let mut ledger = GoalLedger::new();
        for goal in doc.goals {
            ledger.add_goal(goal)?;
        }

        let mut entries: Vec<(EntryKind, Entry)> = doc
            .savings
            .into_iter()
            .map(|e| (EntryKind::Saving, e))
            .chain(doc.debts.into_iter().map(|e| (EntryKind::Debt, e)))
            .collect();
        // Stable: same-day savings stay ahead of debts
        entries.sort_by_key(|(_, e)| e.date);
        for (kind, entry) in entries {
            ledger.add_entry(kind, entry)?;
        }

        if !doc.history.is_empty() {
            ledger.restore_history(doc.history)?;
        }
        Ok(ledger)
    }
}

impl From<GoalLedger> for LedgerDocument {
    fn from(ledger: GoalLedger) -> Self {
        LedgerDocument {
            goals: ledger.goals.into_values().collect(),
            savings: ledger.savings.into_values().collect(),
            debts: ledger.debts.into_values().collect(),
            history: ledger.history,
        }
    }
}

fn not_found(entity: &str, id: &str) -> WealthCalcError {
    WealthCalcError::NotFound {
        entity: entity.into(),
        id: id.into(),
    }
}

fn sum_amounts(entries: &[&Entry], context: &str) -> WealthCalcResult<Money> {
    entries.iter().try_fold(Decimal::ZERO, |acc, e| {
        checked(acc.checked_add(e.amount), context)
    })
}

fn validate_goal(goal: &Goal) -> WealthCalcResult<()> {
    if goal.target_amount <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "target_amount".into(),
            reason: "Goal target must be > 0".into(),
        });
    }
    if goal.target_date <= goal.start_date {
        return Err(WealthCalcError::DateError(format!(
            "goal {} ends on {} which is not after its start {}",
            goal.id, goal.target_date, goal.start_date
        )));
    }
    Ok(())
}

fn validate_entry(kind: EntryKind, entry: &Entry) -> WealthCalcResult<()> {
    if entry.amount <= Decimal::ZERO {
        return Err(WealthCalcError::InvalidInput {
            field: "amount".into(),
            reason: format!("{} amount must be > 0", kind.entity()),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn house() -> Goal {
        Goal {
            id: "house".into(),
            name: "House deposit".into(),
            target_amount: dec!(100_000),
            start_date: date(2024, 1, 1),
            target_date: date(2025, 1, 1),
        }
    }

    fn entry(id: &str, goal_id: &str, amount: Money) -> Entry {
        Entry {
            id: id.into(),
            goal_id: goal_id.into(),
            amount,
            date: date(2024, 3, 1),
            note: None,
        }
    }

    fn seeded() -> GoalLedger {
        let mut ledger = GoalLedger::new();
        ledger.add_goal(house()).unwrap();
        ledger.add_saving(entry("s1", "house", dec!(30_000))).unwrap();
        ledger.add_saving(entry("s2", "house", dec!(20_000))).unwrap();
        ledger.add_debt(entry("d1", "house", dec!(5_000))).unwrap();
        ledger
    }

    #[test]
    fn test_totals_sum_savings_and_debts() {
        let totals = seeded().totals("house").unwrap();
        assert_eq!(totals.savings, dec!(50_000));
        assert_eq!(totals.debts, dec!(5_000));
        assert_eq!(totals.net, dec!(45_000));
    }

    #[test]
    fn test_each_insert_appends_history() {
        let ledger = seeded();
        let history = ledger.history_for("house");
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].kind, EntryKind::Debt);
        let ids: Vec<u64> = history.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_saving_for_unknown_goal_rejected() {
        let mut ledger = seeded();
        let err = ledger.add_saving(entry("s9", "car", dec!(1_000))).unwrap_err();
        assert!(matches!(err, WealthCalcError::ReferentialIntegrity(_)));
        assert_eq!(ledger.history_for("car").len(), 0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut ledger = seeded();
        assert!(matches!(
            ledger.add_goal(house()),
            Err(WealthCalcError::DuplicateId { .. })
        ));
        assert!(matches!(
            ledger.add_saving(entry("s1", "house", dec!(1))),
            Err(WealthCalcError::DuplicateId { .. })
        ));
        // History is untouched by the rejected insert
        assert_eq!(ledger.history_for("house").len(), 3);
    }

    #[test]
    fn test_same_id_allowed_across_kinds() {
        let mut ledger = seeded();
        assert!(ledger.add_debt(entry("s1", "house", dec!(100))).is_ok());
    }

    #[test]
    fn test_delete_goal_cascades() {
        let mut ledger = seeded();
        let mut other = house();
        other.id = "car".into();
        ledger.add_goal(other).unwrap();
        ledger.add_saving(entry("c1", "car", dec!(2_000))).unwrap();

        let removed = ledger.delete_goal("house").unwrap();
        assert_eq!(removed.id, "house");
        assert!(ledger.savings_for("house").is_empty());
        assert!(ledger.debts_for("house").is_empty());
        assert!(ledger.history_for("house").is_empty());
        assert!(ledger.get_saving("s1").is_err());

        assert_eq!(ledger.savings_for("car").len(), 1);
        assert_eq!(ledger.history_for("car").len(), 1);
    }

    #[test]
    fn test_update_and_delete_entries() {
        let mut ledger = seeded();
        let mut s1 = ledger.get_saving("s1").unwrap().clone();
        s1.amount = dec!(35_000);
        s1.note = Some("bonus".into());
        ledger.update_saving(s1).unwrap();
        assert_eq!(ledger.totals("house").unwrap().savings, dec!(55_000));

        ledger.delete_debt("d1").unwrap();
        assert_eq!(ledger.totals("house").unwrap().debts, Decimal::ZERO);
        assert!(matches!(
            ledger.delete_debt("d1"),
            Err(WealthCalcError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_cannot_move_entry_to_missing_goal() {
        let mut ledger = seeded();
        let mut s1 = ledger.get_saving("s1").unwrap().clone();
        s1.goal_id = "boat".into();
        assert!(matches!(
            ledger.update_saving(s1),
            Err(WealthCalcError::ReferentialIntegrity(_))
        ));
    }

    #[test]
    fn test_update_goal_validates_dates() {
        let mut ledger = seeded();
        let mut goal = house();
        goal.target_date = date(2023, 1, 1);
        assert!(matches!(
            ledger.update_goal(goal),
            Err(WealthCalcError::DateError(_))
        ));
    }

    #[test]
    fn test_progress_reads_stored_totals() {
        let ledger = seeded();
        let result = ledger.progress("house", date(2024, 7, 2)).unwrap().result;
        assert_eq!(result.progress_pct, dec!(45));
        assert_eq!(result.expected_pct, dec!(50));
        assert!(!result.on_track);
    }

    #[test]
    fn test_unknown_goal_not_found() {
        let ledger = GoalLedger::new();
        assert!(matches!(
            ledger.totals("nope"),
            Err(WealthCalcError::NotFound { .. })
        ));
        assert!(ledger.list_goals().is_empty());
    }

    #[test]
    fn test_document_without_history_replays_in_date_order() {
        let ledger: GoalLedger = serde_json::from_value(serde_json::json!({
            "goals": [{
                "id": "house",
                "name": "House deposit",
                "target_amount": "100000",
                "start_date": "2024-01-01",
                "target_date": "2025-01-01"
            }],
            "savings": [
                {"id": "s2", "goal_id": "house", "amount": "200", "date": "2024-05-01"},
                {"id": "s1", "goal_id": "house", "amount": "100", "date": "2024-02-01"}
            ],
            "debts": [
                {"id": "d1", "goal_id": "house", "amount": "50", "date": "2024-03-01"}
            ]
        }))
        .unwrap();

        let history = ledger.history_for("house");
        let amounts: Vec<Money> = history.iter().map(|h| h.amount).collect();
        assert_eq!(amounts, vec![dec!(100), dec!(50), dec!(200)]);
        assert_eq!(history[1].kind, EntryKind::Debt);
        assert_eq!(history.last().unwrap().id, 3);
        assert_eq!(ledger.totals("house").unwrap().net, dec!(250));
    }

    #[test]
    fn test_empty_document_loads_empty_ledger() {
        let ledger: GoalLedger = serde_json::from_str("{}").unwrap();
        assert!(ledger.list_goals().is_empty());

        let ledger: GoalLedger = serde_json::from_str(r#"{"goals": []}"#).unwrap();
        assert!(ledger.list_goals().is_empty());
    }

    #[test]
    fn test_document_with_orphan_entry_rejected() {
        let err = serde_json::from_value::<GoalLedger>(serde_json::json!({
            "savings": [
                {"id": "s1", "goal_id": "ghost", "amount": "100", "date": "2024-02-01"}
            ]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown goal ghost"), "got {err}");
    }

    #[test]
    fn test_document_with_negative_amount_rejected() {
        let mut doc = LedgerDocument::from(seeded());
        doc.debts[0].amount = dec!(-5);
        assert!(matches!(
            GoalLedger::try_from(doc),
            Err(WealthCalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_document_with_duplicate_goal_rejected() {
        let doc = LedgerDocument {
            goals: vec![house(), house()],
            ..LedgerDocument::default()
        };
        assert!(matches!(
            GoalLedger::try_from(doc),
            Err(WealthCalcError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_round_trip_keeps_history_of_deleted_entries() {
        let mut ledger = seeded();
        ledger.delete_saving("s2").unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let mut restored: GoalLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.history_for("house").len(), 3);
        assert_eq!(restored.totals("house").unwrap().savings, dec!(30_000));

        // Numbering continues after the stored history
        restored.add_saving(entry("s3", "house", dec!(1_000))).unwrap();
        assert_eq!(restored.history_for("house").last().unwrap().id, 4);
    }

    #[test]
    fn test_document_with_unordered_history_rejected() {
        let mut doc = LedgerDocument::from(seeded());
        doc.history.swap(0, 1);
        assert!(matches!(
            GoalLedger::try_from(doc),
            Err(WealthCalcError::InvalidInput { .. })
        ));
    }
}
