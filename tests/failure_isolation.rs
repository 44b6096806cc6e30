use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use typedag::{
    BuildError, Pipeline, Step, StepFailure, Store, StoreError, TypeTag, TypedStep, into_step,
};

#[derive(Debug, Clone, PartialEq)]
struct Alpha;

#[derive(Debug, Clone, PartialEq)]
struct Beta;

#[derive(Debug, Clone, PartialEq)]
struct Gamma;

struct MakesAlpha;

#[async_trait]
impl TypedStep for MakesAlpha {
    type Output = Alpha;

    async fn run(&self, _store: &Store) -> Result<Option<Alpha>, StepFailure> {
        Ok(Some(Alpha))
    }
}

struct FailsOnBeta;

#[async_trait]
impl TypedStep for FailsOnBeta {
    type Output = Beta;

    fn dependencies(&self) -> Vec<TypeTag> {
        vec![TypeTag::of::<Alpha>()]
    }

    async fn run(&self, _store: &Store) -> Result<Option<Beta>, StepFailure> {
        Err(anyhow!("upstream service said no").into())
    }
}

struct CountsGamma {
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl TypedStep for CountsGamma {
    type Output = Gamma;

    fn dependencies(&self) -> Vec<TypeTag> {
        vec![TypeTag::of::<Beta>()]
    }

    async fn run(&self, _store: &Store) -> Result<Option<Gamma>, StepFailure> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Gamma))
    }
}

#[tokio::test]
async fn a_failing_step_aborts_the_build_and_skips_its_dependents() {
    let runs = Arc::new(AtomicUsize::new(0));
    let steps: Vec<Arc<dyn Step>> = vec![
        into_step(MakesAlpha),
        into_step(FailsOnBeta),
        into_step(CountsGamma { runs: Arc::clone(&runs) }),
    ];

    let result = Pipeline::new(steps).unwrap().build().await;

    match result {
        Err(BuildError::StepFailed { step, source }) => {
            assert_eq!(step, "FailsOnBeta");
            assert!(matches!(source, StepFailure::Business(_)));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

struct FirstFailure;

#[async_trait]
impl TypedStep for FirstFailure {
    type Output = Alpha;

    async fn run(&self, _store: &Store) -> Result<Option<Alpha>, StepFailure> {
        Err(anyhow!("first").into())
    }
}

struct SecondFailure;

#[async_trait]
impl TypedStep for SecondFailure {
    type Output = Beta;

    async fn run(&self, _store: &Store) -> Result<Option<Beta>, StepFailure> {
        Err(anyhow!("second").into())
    }
}

#[tokio::test]
async fn the_first_failure_in_declaration_order_wins() {
    let steps: Vec<Arc<dyn Step>> = vec![into_step(FirstFailure), into_step(SecondFailure)];

    let result = Pipeline::new(steps).unwrap().build().await;

    match result {
        Err(BuildError::StepFailed { step, .. }) => assert_eq!(step, "FirstFailure"),
        other => panic!("expected StepFailed, got {other:?}"),
    }
}

struct ObservesSibling {
    saw_alpha: Arc<AtomicBool>,
}

#[derive(Debug, Clone, PartialEq)]
struct Observation;

#[async_trait]
impl TypedStep for ObservesSibling {
    type Output = Observation;

    async fn run(&self, store: &Store) -> Result<Option<Observation>, StepFailure> {
        // Runs in the same batch as MakesAlpha; the snapshot must not
        // contain the sibling's output.
        self.saw_alpha
            .store(store.contains::<Alpha>(), Ordering::SeqCst);
        Ok(Some(Observation))
    }
}

#[tokio::test]
async fn siblings_in_one_batch_do_not_observe_each_other() {
    let saw_alpha = Arc::new(AtomicBool::new(true));
    let steps: Vec<Arc<dyn Step>> = vec![
        into_step(MakesAlpha),
        into_step(ObservesSibling {
            saw_alpha: Arc::clone(&saw_alpha),
        }),
    ];

    let store = Pipeline::new(steps).unwrap().build().await.unwrap();

    assert!(!saw_alpha.load(Ordering::SeqCst));
    // Both outputs were still committed at the batch boundary.
    assert!(store.contains::<Alpha>());
    assert!(store.contains::<Observation>());
}

struct PanickingStep;

#[async_trait]
impl TypedStep for PanickingStep {
    type Output = Alpha;

    async fn run(&self, _store: &Store) -> Result<Option<Alpha>, StepFailure> {
        panic!("boom");
    }
}

#[tokio::test]
async fn a_panicking_step_fails_the_build_not_the_process() {
    let steps: Vec<Arc<dyn Step>> = vec![into_step(PanickingStep)];

    let result = Pipeline::new(steps).unwrap().build().await;

    match result {
        Err(BuildError::StepFailed { step, source }) => {
            assert_eq!(step, "PanickingStep");
            assert!(matches!(source, StepFailure::Panicked(_)));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
}

struct ReadsUndeclared;

#[async_trait]
impl TypedStep for ReadsUndeclared {
    type Output = Beta;

    async fn run(&self, store: &Store) -> Result<Option<Beta>, StepFailure> {
        // Alpha was never declared as a dependency, so validation did not
        // guarantee it. The miss must surface as a store error, not a
        // business failure.
        let _alpha = store.require::<Alpha>()?;
        Ok(Some(Beta))
    }
}

#[tokio::test]
async fn an_undeclared_require_is_a_distinguishable_store_miss() {
    let steps: Vec<Arc<dyn Step>> = vec![into_step(ReadsUndeclared)];

    let result = Pipeline::new(steps).unwrap().build().await;

    match result {
        Err(BuildError::StepFailed { step, source }) => {
            assert_eq!(step, "ReadsUndeclared");
            assert!(matches!(
                source,
                StepFailure::Store(StoreError::Missing(tag)) if tag == TypeTag::of::<Alpha>()
            ));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
}
