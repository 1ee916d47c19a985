//! Notifications from the engine to the UI collaborator.
//!
//! Components never call into the UI directly. The [`crate::app::Viewer`]
//! publishes [`ViewerEvent`]s on its [`EventBus`]; the UI either drains the
//! queue once per frame or registers subscribers that see events as they are
//! published.

use std::collections::VecDeque;

use crate::gfx::camera::ApproachPattern;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    SelectionChanged {
        selected: Vec<String>,
        primary: Option<String>,
    },
    /// `None` when no annotation is active any more
    ActiveAnnotationChanged {
        object_name: Option<String>,
        annotation_id: Option<String>,
        show_overlay: bool,
    },
    CameraAnimationProgress {
        pattern: ApproachPattern,
        progress: f32,
    },
    CameraAnimationFinished {
        pattern: ApproachPattern,
    },
    TourStarted {
        stops: usize,
    },
    TourStopped,
    TourAdvanced {
        index: usize,
    },
    /// The tour put an annotation overlay on screen
    AnnotationShown {
        annotation_id: Option<String>,
        object_name: String,
    },
    /// The tour hid the current overlay
    AnnotationHidden,
    /// A non-fatal failure, e.g. a texture that could not be loaded
    Warning(String),
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
        dirty: bool,
    },
}

type Subscriber = Box<dyn FnMut(&ViewerEvent)>;

#[derive(Default)]
pub struct EventBus {
    queue: VecDeque<ViewerEvent>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("queued", &self.queue.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ViewerEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn publish(&mut self, event: ViewerEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
        self.queue.push_back(event);
    }

    /// Takes every queued event, oldest first
    pub fn drain(&mut self) -> Vec<ViewerEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
