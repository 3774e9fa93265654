//! Widget session: input state and event-to-operation dispatch.
//!
//! The session is the explicit context object behind the widget: it owns
//! the raw input state, the rate store handle, and the history, and maps
//! each inbound collaborator event to one core operation. Handlers
//! return the refreshed display bundle synchronously; debounced live
//! recomputes are delivered on the update channel instead.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use cambio_common::Currency;
use cambio_rates::{RateSource, RateStore};

use crate::convert::convert;
use crate::debounce::Debouncer;
use crate::display;
use crate::error::EngineResult;
use crate::history::{History, DEFAULT_CAPACITY};
use crate::validate;

/// Inbound events from the widget surface.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Amount text edited; triggers a debounced recompute.
    AmountChanged(String),
    /// Source currency selected; reloads rates for the new base.
    FromCurrencyChanged(Currency),
    /// Target currency selected.
    ToCurrencyChanged(Currency),
    /// Conversion confirmed; validates, converts, records history.
    ConvertRequested,
    /// Swap source and target. Does not reload rates; recomputes
    /// against the active table.
    SwapRequested,
    /// Drop the whole history.
    ClearHistoryRequested,
}

/// Display-string bundle for the widget surface.
#[derive(Debug, Clone)]
pub struct WidgetView {
    /// Formatted converted amount, e.g. `R$ 520.00`.
    pub result_text: String,
    /// Unit-rate description, e.g. `1 USD = R$ 5.20 BRL`.
    pub rate_text: String,
    /// Unit conversions from the active base into the display currencies.
    pub rates_grid: Vec<String>,
    /// History lines, most recent first; the empty-state placeholder
    /// when there is no history.
    pub history_lines: Vec<String>,
    /// Last-updated line, absent before the first load.
    pub last_update: Option<String>,
    /// Provenance of the active table, absent before the first load.
    pub rate_source: Option<RateSource>,
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period before a live recompute fires.
    pub debounce: Duration,
    /// Number of history records kept.
    pub history_capacity: usize,
    /// Currencies shown in the rates grid.
    pub grid_currencies: Vec<Currency>,
    /// Initial source currency.
    pub default_from: Currency,
    /// Initial target currency.
    pub default_to: Currency,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            history_capacity: DEFAULT_CAPACITY,
            grid_currencies: ["USD", "EUR", "GBP", "JPY", "BRL", "CAD", "AUD"]
                .into_iter()
                .map(Currency::new)
                .collect(),
            default_from: Currency::usd(),
            default_to: Currency::brl(),
        }
    }
}

#[derive(Debug)]
struct Inputs {
    amount_raw: String,
    from: Currency,
    to: Currency,
}

/// One widget session, constructed at startup and dropped at shutdown.
pub struct Session {
    store: Arc<RateStore>,
    history: Arc<History>,
    inputs: Arc<RwLock<Inputs>>,
    config: SessionConfig,
    debouncer: Debouncer,
    updates: mpsc::UnboundedSender<WidgetView>,
}

impl Session {
    /// Create a session over the given store and history.
    ///
    /// The returned receiver carries the views produced by debounced
    /// recomputes; direct event handling returns its view inline.
    pub fn new(
        store: Arc<RateStore>,
        history: Arc<History>,
        config: SessionConfig,
    ) -> (Self, mpsc::UnboundedReceiver<WidgetView>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let inputs = Inputs {
            amount_raw: String::new(),
            from: config.default_from.clone(),
            to: config.default_to.clone(),
        };

        let session = Self {
            store,
            history,
            inputs: Arc::new(RwLock::new(inputs)),
            config,
            debouncer: Debouncer::new(),
            updates: tx,
        };
        (session, rx)
    }

    /// Load rates for the initial base currency and build the first view.
    pub async fn start(&self) -> WidgetView {
        let from = self.inputs.read().from.clone();
        self.store.load(&from).await;
        self.view()
    }

    /// Apply one inbound event.
    ///
    /// Returns the refreshed view for events that complete immediately;
    /// `AmountChanged` returns `None` and delivers its view through the
    /// update channel once the quiet period elapses.
    pub async fn handle(&mut self, event: InputEvent) -> EngineResult<Option<WidgetView>> {
        match event {
            InputEvent::AmountChanged(raw) => {
                self.inputs.write().amount_raw = raw;
                self.schedule_recompute();
                Ok(None)
            }
            InputEvent::FromCurrencyChanged(currency) => {
                self.inputs.write().from = currency.clone();
                self.store.load(&currency).await;
                Ok(Some(self.view()))
            }
            InputEvent::ToCurrencyChanged(currency) => {
                self.inputs.write().to = currency;
                Ok(Some(self.view()))
            }
            InputEvent::SwapRequested => {
                {
                    let mut inputs = self.inputs.write();
                    let inputs = &mut *inputs;
                    std::mem::swap(&mut inputs.from, &mut inputs.to);
                }
                Ok(Some(self.view()))
            }
            InputEvent::ConvertRequested => {
                let (raw, from, to) = {
                    let inputs = self.inputs.read();
                    (
                        inputs.amount_raw.clone(),
                        inputs.from.clone(),
                        inputs.to.clone(),
                    )
                };

                let amount = validate::parse_amount(&raw)?;

                let result = match self.store.current_table() {
                    Some(table) => convert(&table, amount, &from, &to),
                    None => {
                        warn!("No rates loaded yet, recording sentinel result");
                        0.0
                    }
                };

                let record = self.history.record(amount, from, to, result);
                info!(
                    record_id = record.id,
                    from = %record.from_currency,
                    to = %record.to_currency,
                    rate = record.rate,
                    "Conversion recorded"
                );

                Ok(Some(self.view()))
            }
            InputEvent::ClearHistoryRequested => {
                self.history.clear();
                Ok(Some(self.view()))
            }
        }
    }

    /// Build the view for the current state.
    pub fn view(&self) -> WidgetView {
        let inputs = self.inputs.read();
        build_view(&self.store, &self.history, &self.config, &inputs)
    }

    fn schedule_recompute(&mut self) {
        let store = self.store.clone();
        let history = self.history.clone();
        let inputs = self.inputs.clone();
        let config = self.config.clone();
        let updates = self.updates.clone();

        self.debouncer.schedule(self.config.debounce, async move {
            let view = {
                let inputs = inputs.read();
                build_view(&store, &history, &config, &inputs)
            };
            // Receiver gone means the surface went away; nothing to do.
            let _ = updates.send(view);
        });
    }
}

fn build_view(
    store: &RateStore,
    history: &History,
    config: &SessionConfig,
    inputs: &Inputs,
) -> WidgetView {
    let amount = validate::parse_loose(&inputs.amount_raw);
    let loaded = store.current();

    let (result, unit_rate) = match &loaded {
        Some(l) => (
            convert(&l.table, amount, &inputs.from, &inputs.to),
            convert(&l.table, 1.0, &inputs.from, &inputs.to),
        ),
        None => (0.0, 0.0),
    };

    let records = history.records();
    let history_lines = if records.is_empty() {
        vec![display::EMPTY_HISTORY.to_string()]
    } else {
        records.iter().map(display::history_line).collect()
    };

    WidgetView {
        result_text: display::format_amount(result, &inputs.to),
        rate_text: display::rate_text(&inputs.from, &inputs.to, unit_rate),
        rates_grid: loaded
            .as_ref()
            .map(|l| display::rates_grid(&l.table, &config.grid_currencies))
            .unwrap_or_default(),
        history_lines,
        last_update: loaded.as_ref().map(|l| display::last_update_text(l.loaded_at)),
        rate_source: loaded.as_ref().map(|l| l.source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cambio_common::{MemoryStore, RateTable};
    use cambio_rates::provider::StaticRateProvider;
    use cambio_rates::RateServiceConfig;

    fn make_session(debounce_ms: u64) -> (Session, mpsc::UnboundedReceiver<WidgetView>) {
        let provider = StaticRateProvider::new("test");
        provider.set_table(RateTable::from_pairs(
            Currency::usd(),
            [("BRL", 5.20), ("EUR", 0.85)],
        ));
        provider.set_table(RateTable::from_pairs(
            Currency::eur(),
            [("USD", 1.18), ("BRL", 6.15)],
        ));

        let storage = Arc::new(MemoryStore::new());
        let store = Arc::new(RateStore::new(
            Arc::new(provider),
            storage.clone(),
            &RateServiceConfig::default(),
        ));
        let history = Arc::new(History::load(storage, DEFAULT_CAPACITY));

        let config = SessionConfig {
            debounce: Duration::from_millis(debounce_ms),
            ..Default::default()
        };
        Session::new(store, history, config)
    }

    #[tokio::test]
    async fn test_start_loads_default_base() {
        let (session, _rx) = make_session(300);

        let view = session.start().await;

        assert_eq!(view.rate_source, Some(RateSource::Live));
        assert_eq!(view.rate_text, "1 USD = R$ 5.20 BRL");
        assert!(view.last_update.is_some());
    }

    #[tokio::test]
    async fn test_convert_requested_records_history() {
        let (mut session, _rx) = make_session(300);
        session.start().await;

        session
            .handle(InputEvent::AmountChanged("100".to_string()))
            .await
            .unwrap();
        let view = session
            .handle(InputEvent::ConvertRequested)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.result_text, "R$ 520.00");
        assert_eq!(view.history_lines.len(), 1);
        assert!(view.history_lines[0].starts_with("US$ 100.00 → R$ 520.00"));
    }

    #[tokio::test]
    async fn test_convert_requested_rejects_bad_amount() {
        let (mut session, _rx) = make_session(300);
        session.start().await;

        session
            .handle(InputEvent::AmountChanged("-3".to_string()))
            .await
            .unwrap();
        let result = session.handle(InputEvent::ConvertRequested).await;

        assert!(result.is_err());
        // Nothing was recorded.
        assert!(session.view().history_lines[0].contains(display::EMPTY_HISTORY));
    }

    #[tokio::test]
    async fn test_from_change_reloads_and_replaces_table() {
        let (mut session, _rx) = make_session(300);
        session.start().await;

        let view = session
            .handle(InputEvent::FromCurrencyChanged(Currency::eur()))
            .await
            .unwrap()
            .unwrap();

        assert!(view.rates_grid.iter().all(|row| row.starts_with("1 EUR = ")));
    }

    #[tokio::test]
    async fn test_swap_does_not_reload_rates() {
        let (mut session, _rx) = make_session(300);
        session.start().await;

        let view = session
            .handle(InputEvent::SwapRequested)
            .await
            .unwrap()
            .unwrap();

        // From/to swapped, but the active table still has the USD base.
        assert_eq!(view.rate_text, "1 BRL = US$ 0.19 USD");
        assert!(view.rates_grid.iter().all(|row| row.starts_with("1 USD = ")));
    }

    #[tokio::test]
    async fn test_clear_history_shows_empty_state() {
        let (mut session, _rx) = make_session(300);
        session.start().await;

        session
            .handle(InputEvent::AmountChanged("100".to_string()))
            .await
            .unwrap();
        session.handle(InputEvent::ConvertRequested).await.unwrap();

        let view = session
            .handle(InputEvent::ClearHistoryRequested)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.history_lines, vec![display::EMPTY_HISTORY.to_string()]);
    }

    #[tokio::test]
    async fn test_debounced_recompute_is_last_write_wins() {
        let (mut session, mut rx) = make_session(20);
        session.start().await;

        for raw in ["1", "10", "100"] {
            session
                .handle(InputEvent::AmountChanged(raw.to_string()))
                .await
                .unwrap();
        }

        let view = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("debounced view should arrive")
            .expect("channel open");

        // Only the final edit fired, and it used the latest amount.
        assert_eq!(view.result_text, "R$ 520.00");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_live_recompute_treats_garbage_as_zero() {
        let (mut session, mut rx) = make_session(20);
        session.start().await;

        session
            .handle(InputEvent::AmountChanged("not a number".to_string()))
            .await
            .unwrap();

        let view = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("debounced view should arrive")
            .expect("channel open");

        assert_eq!(view.result_text, "R$ 0.00");
    }
}
