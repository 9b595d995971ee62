//! # Print Dispatcher
//!
//! Assembles a multi-copy print job for the markup channel and drives it
//! through an isolated rendering surface: build the document, wait for the
//! host to finish instantiating barcode symbols, trigger the platform print
//! flow exactly once, then clean up. A job moves Idle → Building → Printing
//! → Idle and owns its surface exclusively until teardown.
//!
//! Cleanup is raced: the print-finished signal against a fixed timeout,
//! whichever fires first. The same timeout bounds the barcode wait, so a
//! stalled surface can never hold a job open indefinitely. Concurrent jobs
//! are fine; each one creates its own surface, and the registry is
//! read-only shared state.

use crate::entity::LabelEntity;
use crate::error::LabelError;
use crate::markup;
use crate::template::TemplateRegistry;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Default bound on each waiting phase of a job.
pub const DEFAULT_CLEANUP_TIMEOUT: Duration = Duration::from_secs(10);

/// An isolated rendering surface owned by one print job.
///
/// The host implements this over whatever it renders into (a detached
/// iframe, a headless page, a test probe). `teardown` must be idempotent:
/// the dispatcher guarantees it runs, and a host firing its own cleanup
/// trigger afterwards is a no-op, not an error.
pub trait Surface {
    /// Load the assembled printable document.
    fn load(&mut self, document: &str);

    /// Resolves once every embedded barcode symbol has finished rendering.
    async fn barcodes_ready(&mut self);

    /// Trigger the platform print flow. Called at most once per job.
    fn print(&mut self);

    /// Resolves when the platform print flow reports completion.
    async fn print_finished(&mut self);

    /// Release the surface. Safe to call more than once.
    fn teardown(&mut self);
}

/// Creates surfaces for print jobs.
pub trait SurfaceFactory {
    type Surface: Surface;

    /// Allocate a surface for a label of the given physical size.
    /// Resource exhaustion is [`LabelError::SurfaceCreationFailed`].
    fn create(&self, width_mm: f64, height_mm: f64) -> Result<Self::Surface, LabelError>;
}

/// Which trigger ended the Printing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupTrigger {
    PrintFinished,
    Timeout,
}

/// Outcome of one print job.
///
/// `template_id` is the *resolved* id: a caller that passed an unknown id
/// can detect the documented fallback by comparing it with what it asked
/// for.
#[derive(Debug, Clone)]
pub struct PrintReport {
    pub template_id: String,
    pub copies: usize,
    /// Whether the platform print flow was triggered.
    pub printed: bool,
    /// `None` when no surface was ever created (empty job).
    pub cleanup: Option<CleanupTrigger>,
}

/// Drives print jobs against a surface factory.
pub struct PrintDispatcher<F> {
    factory: F,
    cleanup_timeout: Duration,
}

impl<F: SurfaceFactory> PrintDispatcher<F> {
    pub fn new(factory: F) -> Self {
        Self::with_timeout(factory, DEFAULT_CLEANUP_TIMEOUT)
    }

    pub fn with_timeout(factory: F, cleanup_timeout: Duration) -> Self {
        PrintDispatcher {
            factory,
            cleanup_timeout,
        }
    }

    /// Print one label per entity, in request order.
    pub async fn print(
        &self,
        registry: &TemplateRegistry,
        template_id: Option<&str>,
        entities: &[LabelEntity],
    ) -> Result<PrintReport, LabelError> {
        let template = registry.get(template_id);

        if entities.is_empty() {
            debug!(template = template.id, "empty job, nothing to print");
            return Ok(PrintReport {
                template_id: template.id.to_string(),
                copies: 0,
                printed: false,
                cleanup: None,
            });
        }

        // Building: one fragment per copy, stylesheet attached once.
        debug!(template = template.id, copies = entities.len(), "building print job");
        let fragments: Vec<String> = entities
            .iter()
            .map(|entity| template.render_markup(entity))
            .collect();
        let document = markup::document(&template.stylesheet(), &fragments);

        let mut surface = self.factory.create(template.width_mm, template.height_mm)?;
        surface.load(&document);

        // Printing: barcode symbols first, then the print flow, each phase
        // bounded by the cleanup timeout.
        let barcodes_done = tokio::select! {
            _ = surface.barcodes_ready() => true,
            _ = sleep(self.cleanup_timeout) => false,
        };

        let printed = barcodes_done;
        let cleanup = if barcodes_done {
            info!(template = template.id, "barcodes ready, triggering print flow");
            surface.print();
            tokio::select! {
                _ = surface.print_finished() => CleanupTrigger::PrintFinished,
                _ = sleep(self.cleanup_timeout) => CleanupTrigger::Timeout,
            }
        } else {
            warn!(template = template.id, "barcode rendering stalled, abandoning job");
            CleanupTrigger::Timeout
        };

        if cleanup == CleanupTrigger::Timeout {
            warn!(template = template.id, "cleanup by timeout");
        }
        surface.teardown();

        Ok(PrintReport {
            template_id: template.id.to_string(),
            copies: entities.len(),
            printed,
            cleanup: Some(cleanup),
        })
    }

    /// Print `copies` labels of one entity, stamping a running part index
    /// (`1..=copies` of `copies`) on package entities.
    pub async fn print_copies(
        &self,
        registry: &TemplateRegistry,
        template_id: Option<&str>,
        entity: &LabelEntity,
        copies: u32,
    ) -> Result<PrintReport, LabelError> {
        let entities: Vec<LabelEntity> = (1..=copies)
            .map(|index| entity.with_part(index, copies))
            .collect();
        self.print(registry, template_id, &entities).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Article, Package};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    /// How a mock completion signal behaves.
    enum Signal {
        Now,
        Never,
        When(oneshot::Receiver<()>),
    }

    impl Signal {
        async fn wait(&mut self) {
            match std::mem::replace(self, Signal::Now) {
                Signal::Now => {}
                Signal::Never => std::future::pending::<()>().await,
                Signal::When(rx) => {
                    let _ = rx.await;
                }
            }
        }
    }

    #[derive(Clone, Default)]
    struct Probe {
        document: Arc<Mutex<Option<String>>>,
        printed: Arc<AtomicBool>,
        teardowns: Arc<AtomicUsize>,
    }

    struct MockSurface {
        probe: Probe,
        barcodes: Signal,
        finished: Signal,
    }

    impl Surface for MockSurface {
        fn load(&mut self, document: &str) {
            *self.probe.document.lock().unwrap() = Some(document.to_string());
        }

        async fn barcodes_ready(&mut self) {
            self.barcodes.wait().await;
        }

        fn print(&mut self) {
            self.probe.printed.store(true, Ordering::SeqCst);
        }

        async fn print_finished(&mut self) {
            self.finished.wait().await;
        }

        fn teardown(&mut self) {
            self.probe.teardowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct MockFactory {
        probe: Probe,
        fail: bool,
        barcodes: Mutex<Option<Signal>>,
        finished: Mutex<Option<Signal>>,
    }

    impl MockFactory {
        fn ready() -> Self {
            Self::with_signals(Signal::Now, Signal::Now)
        }

        fn with_signals(barcodes: Signal, finished: Signal) -> Self {
            MockFactory {
                probe: Probe::default(),
                fail: false,
                barcodes: Mutex::new(Some(barcodes)),
                finished: Mutex::new(Some(finished)),
            }
        }

        fn failing() -> Self {
            let mut f = Self::ready();
            f.fail = true;
            f
        }
    }

    impl SurfaceFactory for MockFactory {
        type Surface = MockSurface;

        fn create(&self, _width_mm: f64, _height_mm: f64) -> Result<MockSurface, LabelError> {
            if self.fail {
                return Err(LabelError::SurfaceCreationFailed("out of surfaces".into()));
            }
            Ok(MockSurface {
                probe: self.probe.clone(),
                barcodes: self.barcodes.lock().unwrap().take().unwrap_or(Signal::Now),
                finished: self.finished.lock().unwrap().take().unwrap_or(Signal::Now),
            })
        }
    }

    fn package() -> LabelEntity {
        LabelEntity::Package(Package {
            folio: "F-000123".into(),
            recipient: "Ana Torres".into(),
            ..Default::default()
        })
    }

    fn article() -> LabelEntity {
        LabelEntity::Article(Article {
            name: "Zapato X".into(),
            code: "ABC123".into(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_copies_are_stamped_in_order() {
        let factory = MockFactory::ready();
        let probe = factory.probe.clone();
        let dispatcher = PrintDispatcher::new(factory);
        let registry = TemplateRegistry::with_package();

        let report = dispatcher
            .print_copies(&registry, Some("package-4x6"), &package(), 3)
            .await
            .unwrap();

        assert_eq!(report.copies, 3);
        assert!(report.printed);
        assert_eq!(report.cleanup, Some(CleanupTrigger::PrintFinished));

        let doc = probe.document.lock().unwrap().clone().unwrap();
        // Anchor on the rendered text nodes; the bare "i / n" form also
        // occurs inside the stylesheet's grid-area shorthand.
        let positions: Vec<usize> = [">1 / 3<", ">2 / 3<", ">3 / 3<"]
            .iter()
            .map(|part| doc.find(part).unwrap_or_else(|| panic!("missing {part}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "copies out of order");
        assert!(probe.printed.load(Ordering::SeqCst));
        assert_eq!(probe.teardowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_template_proceeds_on_fallback() {
        let dispatcher = PrintDispatcher::new(MockFactory::ready());
        let registry = TemplateRegistry::standard();

        let requested = "no-such-template";
        let report = dispatcher
            .print(&registry, Some(requested), &[article()])
            .await
            .unwrap();

        assert!(report.printed);
        assert_eq!(report.template_id, "standard-69x25");
        assert_ne!(report.template_id, requested);
    }

    #[tokio::test]
    async fn test_surface_creation_failure_cleans_nothing() {
        let factory = MockFactory::failing();
        let probe = factory.probe.clone();
        let dispatcher = PrintDispatcher::new(factory);
        let registry = TemplateRegistry::standard();

        let err = dispatcher
            .print(&registry, None, &[article()])
            .await
            .unwrap_err();

        assert!(matches!(err, LabelError::SurfaceCreationFailed(_)));
        assert_eq!(probe.teardowns.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_job_creates_no_surface() {
        let factory = MockFactory::ready();
        let probe = factory.probe.clone();
        let dispatcher = PrintDispatcher::new(factory);
        let registry = TemplateRegistry::standard();

        let report = dispatcher.print(&registry, None, &[]).await.unwrap();

        assert_eq!(report.copies, 0);
        assert!(!report.printed);
        assert_eq!(report.cleanup, None);
        assert!(probe.document.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_print_flow_cleans_up_by_timeout() {
        let factory = MockFactory::with_signals(Signal::Now, Signal::Never);
        let probe = factory.probe.clone();
        let dispatcher = PrintDispatcher::with_timeout(factory, Duration::from_secs(5));
        let registry = TemplateRegistry::standard();

        let report = dispatcher
            .print(&registry, None, &[article()])
            .await
            .unwrap();

        assert!(report.printed);
        assert_eq!(report.cleanup, Some(CleanupTrigger::Timeout));
        assert_eq!(probe.teardowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_barcodes_never_trigger_print() {
        let factory = MockFactory::with_signals(Signal::Never, Signal::Now);
        let probe = factory.probe.clone();
        let dispatcher = PrintDispatcher::with_timeout(factory, Duration::from_secs(5));
        let registry = TemplateRegistry::standard();

        let report = dispatcher
            .print(&registry, None, &[article()])
            .await
            .unwrap();

        assert!(!report.printed);
        assert!(!probe.printed.load(Ordering::SeqCst));
        assert_eq!(report.cleanup, Some(CleanupTrigger::Timeout));
        assert_eq!(probe.teardowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_print_waits_for_late_barcode_signal() {
        let (tx, rx) = oneshot::channel();
        // Signal already sent when the dispatcher awaits it.
        tx.send(()).unwrap();
        let factory = MockFactory::with_signals(Signal::When(rx), Signal::Now);
        let probe = factory.probe.clone();
        let dispatcher = PrintDispatcher::new(factory);
        let registry = TemplateRegistry::standard();

        let report = dispatcher
            .print(&registry, None, &[article()])
            .await
            .unwrap();

        assert!(report.printed);
        assert!(probe.printed.load(Ordering::SeqCst));
    }
}
