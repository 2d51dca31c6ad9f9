//! The application service presentation layers talk to.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use mmm_config::Config;
use mmm_core::{
    dashboard_model, export_csv, group_overview, report_filename, report_model, scan_or_fallback,
    Clock, CoreError, DashboardModel, GroupBudgetRow, GroupFilter, LedgerSnapshot, LedgerStorage,
    LedgerStore, ReportModel, ScanResult, SlipScanner, TimeFilter,
};
use mmm_domain::{Group, Transaction};
use mmm_storage_json::JsonLedgerStorage;

/// Owns the canonical ledger state and the save-after-mutation policy.
///
/// Every successful mutation triggers a best-effort save: a failure is
/// logged and the in-memory state kept, so the user's action survives even
/// when the disk does not cooperate. Screen models are recomputed from a
/// fresh snapshot on every call.
pub struct App {
    store: LedgerStore,
    storage: Arc<dyn LedgerStorage>,
    clock: Arc<dyn Clock>,
}

impl App {
    /// Loads prior state from the given storage; empty collections on first
    /// run.
    pub fn bootstrap(
        storage: Arc<dyn LedgerStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let (transactions, groups) = storage.load()?;
        Ok(Self {
            store: LedgerStore::from_parts(transactions, groups),
            storage,
            clock,
        })
    }

    /// Bootstraps against JSON storage in the configured data directory.
    pub fn bootstrap_from_config(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let storage = JsonLedgerStorage::new(config.resolve_data_dir())?;
        Self::bootstrap(Arc::new(storage), clock)
    }

    /// Records a new transaction or replaces an edited one, then saves.
    pub fn record_transaction(&mut self, txn: Transaction) -> Result<(), CoreError> {
        self.store.upsert_transaction(txn)?;
        self.persist();
        Ok(())
    }

    pub fn create_group(&mut self, group: Group) -> Result<(), CoreError> {
        self.store.add_group(group)?;
        self.persist();
        Ok(())
    }

    pub fn update_group(&mut self, group: Group) -> Result<(), CoreError> {
        self.store.update_group(group)?;
        self.persist();
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot<'_> {
        self.store.snapshot()
    }

    pub fn dashboard(&self) -> DashboardModel {
        dashboard_model(self.store.snapshot())
    }

    pub fn report(&self, group: GroupFilter, time: TimeFilter) -> ReportModel {
        report_model(self.store.snapshot(), group, time, self.clock.today())
    }

    pub fn group_overview(&self) -> Vec<GroupBudgetRow> {
        group_overview(self.store.snapshot())
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.store.group(id)
    }

    /// Exports the currently filtered view as `(filename, csv)`.
    pub fn export_report(
        &self,
        group: GroupFilter,
        time: TimeFilter,
    ) -> Result<(String, String), CoreError> {
        let model = self.report(group, time);
        let csv = export_csv(&model.filtered, self.store.groups())?;
        Ok((report_filename(self.clock.today()), csv))
    }

    /// Runs a slip scan, degrading to the safe fallback on failure. The
    /// ledger is never touched here; the caller records the (possibly
    /// edited) result explicitly once the user confirms.
    pub fn scan_slip(&self, scanner: &dyn SlipScanner, image: &[u8], mime_type: &str) -> ScanResult {
        scan_or_fallback(scanner, image, mime_type, self.clock.today())
    }

    fn persist(&self) {
        if let Err(err) = self
            .storage
            .save(self.store.transactions(), self.store.groups())
        {
            warn!(error = %err, "ledger save failed; keeping in-memory state");
        }
    }
}
