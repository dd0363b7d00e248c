use std::time::Duration;

use console_async::types::{AvailableModule, BranchId, ProductId};
use console_async::{Client, ConsoleConfig};
use module_selection::{CatalogProvider, LoadFailure, LoadOutcome, Reconciler};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn module(id: u64, name: &str, is_configured: bool) -> AvailableModule {
    AvailableModule {
        id,
        name: name.into(),
        is_configured,
    }
}

/// Never answers within any sane timeout.
struct Hanging;

impl CatalogProvider for Hanging {
    async fn fetch_catalog(
        &self,
        _branch_id: BranchId,
        _product_id: ProductId,
    ) -> Result<Vec<AvailableModule>, LoadFailure> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }
}

fn fast_client(server: &MockServer) -> Client<ConsoleConfig> {
    Client::with_config(ConsoleConfig::new().with_api_base(server.uri())).with_backoff(
        backon::ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(5))
            .with_max_times(1),
    )
}

#[test]
fn late_response_from_older_load_is_discarded() {
    let mut r = Reconciler::default();

    let first = r.begin_load(3, 7).unwrap();
    let second = r.begin_load(3, 8).unwrap();

    let outcome = r.complete_load(second, Ok(vec![module(10, "Loans", true)]));
    assert!(matches!(outcome, LoadOutcome::Loaded { .. }));

    let late = r.complete_load(first, Ok(vec![module(1, "Auth", true)]));
    assert_eq!(late, LoadOutcome::Stale);

    assert_eq!(r.catalog().scope(), Some((3, 8)));
    assert_eq!(r.serialize(), "10");
    assert!(!r.catalog().contains(1));
}

#[test]
fn late_failure_from_older_load_does_not_clear_newer_catalog() {
    let mut r = Reconciler::default();

    let first = r.begin_load(3, 7).unwrap();
    let second = r.begin_load(3, 8).unwrap();
    r.complete_load(second, Ok(vec![module(10, "Loans", true)]));

    let late = r.complete_load(first, Err(LoadFailure::Transport("reset".into())));
    assert_eq!(late, LoadOutcome::Stale);
    assert!(r.is_ready());
    assert_eq!(r.catalog().len(), 1);
}

#[test]
fn reset_invalidates_pending_load() {
    let mut r = Reconciler::default();
    let ticket = r.begin_load(3, 7).unwrap();
    r.reset();

    assert_eq!(
        r.complete_load(ticket, Ok(vec![module(1, "Auth", true)])),
        LoadOutcome::Stale
    );
    assert!(r.catalog().is_empty());
}

#[test]
fn repeated_completion_keeps_toggles() {
    let mut r = Reconciler::default();
    let ticket = r.begin_load(3, 7).unwrap();
    let duplicate = ticket.clone();
    let catalog = vec![module(1, "Auth", true), module(2, "Billing", false)];

    assert!(matches!(
        r.complete_load(ticket, Ok(catalog.clone())),
        LoadOutcome::Loaded { .. }
    ));
    assert!(r.toggle(2, true));

    assert_eq!(r.complete_load(duplicate, Ok(catalog)), LoadOutcome::Stale);
    assert_eq!(r.serialize(), "1,2");
    assert!(r.is_ready());
}

#[test]
fn repeated_failure_does_not_clear_loaded_catalog() {
    let mut r = Reconciler::default();
    let ticket = r.begin_load(3, 7).unwrap();
    let duplicate = ticket.clone();
    r.complete_load(ticket, Ok(vec![module(1, "Auth", true)]));

    let outcome = r.complete_load(duplicate, Err(LoadFailure::Transport("reset".into())));
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(r.catalog().len(), 1);
}

#[test]
fn new_load_clears_selection_before_response() {
    let mut r = Reconciler::default();
    let ticket = r.begin_load(3, 7).unwrap();
    r.complete_load(ticket, Ok(vec![module(1, "Auth", true)]));
    assert_eq!(r.serialize(), "1");

    let _pending = r.begin_load(3, 8).unwrap();
    assert_eq!(r.serialize(), "");
    assert!(!r.is_ready());
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out() {
    let mut r = Reconciler::default().with_load_timeout(Duration::from_secs(2));

    let outcome = r.load_catalog(&Hanging, 3, 7).await;

    assert_eq!(
        outcome,
        LoadOutcome::Failed(LoadFailure::Timeout(Duration::from_secs(2)))
    );
    assert!(!r.is_ready());
}

#[tokio::test]
async fn loads_through_console_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/7/modules"))
        .and(query_param("branch_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Auth", "is_configured": true},
            {"id": 2, "name": "Billing", "is_configured": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut r = Reconciler::default();
    let outcome = r.load_catalog(&fast_client(&server), 3, 7).await;

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            modules: 2,
            selected: 1
        }
    );
}

#[tokio::test]
async fn non_success_status_is_load_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/7/modules"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Product with ID 7 not found."})),
        )
        .mount(&server)
        .await;

    let mut r = Reconciler::default();
    let outcome = r.load_catalog(&fast_client(&server), 3, 7).await;

    assert_eq!(
        outcome,
        LoadOutcome::Failed(LoadFailure::Status {
            status: 404,
            message: "Product with ID 7 not found.".into()
        })
    );
    assert!(r.catalog().is_empty());
}
