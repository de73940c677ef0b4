//! The book: pages, reading position, and the per-frame update that ties the
//! animators, surfaces and stacks to it.

mod controller;

pub use controller::BookController;

use crate::animator::PageAnimator;
use crate::config::BookConfig;
use crate::error::{BookError, Result};
use crate::frame::{BookPose, FrameClock, FrameState, PageRenderState};
use crate::input::InputMapper;
use crate::mesher::PageGeometry;
use crate::stack::StackDepths;
use crate::types::{PageDescriptor, PageFace, PageSource, PointerHit, TurnCommand};

/// Runtime state of one page, created on its first tick.
#[derive(Debug, Clone)]
struct PageRuntime {
    animator: PageAnimator,
    geometry: PageGeometry,
}

/// An interactive book with animated page turns.
///
/// Commands take effect immediately; the next [`tick`](FlippingBook::tick)
/// then moves every page toward the new reading position, in index order.
#[derive(Debug, Clone)]
pub struct FlippingBook {
    pages: Vec<PageDescriptor>,
    config: BookConfig,
    controller: BookController,
    input: InputMapper,
    runtime: Vec<Option<PageRuntime>>,
    stacks: StackDepths,
    clock: FrameClock,
}

impl FlippingBook {
    /// Build a closed book from a page source.
    pub fn new<S: PageSource + ?Sized>(source: &S, config: BookConfig) -> Result<Self> {
        config.validate()?;

        let pages: Vec<PageDescriptor> = source.iter_pages().cloned().collect();
        if pages.is_empty() {
            return Err(BookError::EmptyBook);
        }
        if pages.len() != source.page_count() {
            return Err(BookError::InvalidPage(format!(
                "source reports {} pages but yielded {}",
                source.page_count(),
                pages.len()
            )));
        }
        if let Some((position, page)) = pages.iter().enumerate().find(|(i, p)| p.index != *i) {
            return Err(BookError::InvalidPage(format!(
                "page at position {} has index {}",
                position, page.index
            )));
        }

        let page_count = pages.len();
        let controller = BookController::new(page_count, config.terminal_page);
        let stacks = StackDepths::for_config(0, page_count, &config);
        log::debug!(
            "built book with {} pages ({:?}, {:?})",
            page_count,
            config.click_policy,
            config.terminal_page
        );

        Ok(Self {
            input: InputMapper::from_config(&config),
            runtime: vec![None; page_count],
            pages,
            config,
            controller,
            stacks,
            clock: FrameClock::default(),
        })
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn controller(&self) -> &BookController {
        &self.controller
    }

    pub fn current_page(&self) -> usize {
        self.controller.current_page()
    }

    pub fn stack_depths(&self) -> StackDepths {
        self.stacks
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    /// Turn one page forward. Returns `true` if the reading position moved.
    pub fn turn_forward(&mut self) -> bool {
        self.apply(TurnCommand::Forward)
    }

    /// Turn one page back. Returns `true` if the reading position moved.
    pub fn turn_back(&mut self) -> bool {
        self.apply(TurnCommand::Back)
    }

    /// Dispatch a turn command.
    pub fn apply(&mut self, command: TurnCommand) -> bool {
        let changed = self.controller.apply(command);
        if changed {
            log::debug!("turn {:?} -> page {}", command, self.controller.current_page());
        }
        changed
    }

    /// Route a pointer hit. Returns the command it produced, if any.
    pub fn handle_click(&mut self, hit: &PointerHit) -> Option<TurnCommand> {
        let command = self.input.map_click(&self.controller, hit)?;
        self.apply(command);
        Some(command)
    }

    /// Whether a page currently reacts to the pointer.
    pub fn is_interactive(&self, index: usize) -> bool {
        self.input.is_interactive(&self.controller, index)
    }

    /// Advance every page by one frame.
    pub fn tick(&mut self, clock: FrameClock) {
        self.clock = clock;
        let current_page = self.controller.current_page();
        let page_count = self.pages.len();

        for (index, slot) in self.runtime.iter_mut().enumerate() {
            let config = &self.config;
            let runtime = slot.get_or_insert_with(|| PageRuntime {
                animator: PageAnimator::new(index, current_page, page_count, config),
                geometry: PageGeometry::new(config),
            });

            runtime.animator.tick(current_page, page_count, config);
            runtime.geometry.deform(runtime.animator.flip_progress());
        }

        self.stacks = StackDepths::for_config(current_page, page_count, &self.config);
    }

    /// Tick at `delta` seconds per frame until every page rests, up to `max_ticks`.
    /// Returns the number of ticks run.
    pub fn settle(&mut self, delta: f32, max_ticks: usize) -> usize {
        for ticks in 0..max_ticks {
            if ticks > 0 && self.is_settled() {
                return ticks;
            }
            self.tick(self.clock.next(delta));
        }
        max_ticks
    }

    /// Whether every page has converged on its rest angle.
    pub fn is_settled(&self) -> bool {
        (0..self.pages.len()).all(|i| {
            self.page_state(i)
                .map(|state| state.phase.is_at_rest())
                .unwrap_or(false)
        })
    }

    /// The animator for a page, once it has ticked.
    pub fn animator(&self, index: usize) -> Option<&PageAnimator> {
        self.runtime.get(index)?.as_ref().map(|r| &r.animator)
    }

    /// The bent surfaces of a page, once it has ticked.
    pub fn geometry(&self, index: usize) -> Option<&PageGeometry> {
        self.runtime.get(index)?.as_ref().map(|r| &r.geometry)
    }

    /// Render state of one page. Pages that have not ticked yet report their start state.
    pub fn page_state(&self, index: usize) -> Option<PageRenderState> {
        let page = self.pages.get(index)?;
        let current_page = self.controller.current_page();
        let animator = match self.animator(index) {
            Some(animator) => animator.clone(),
            None => PageAnimator::new(index, current_page, self.pages.len(), &self.config),
        };

        let flipped = self.controller.is_flipped(index);
        let visible_face = if flipped { PageFace::Back } else { PageFace::Front };

        Some(PageRenderState {
            index,
            role: page.role,
            angle: animator.angle(),
            depth: animator.depth(),
            flip_progress: animator.flip_progress(),
            flipped,
            phase: animator.phase(current_page, self.config.angle_epsilon),
            visible_face,
            material: page.role.material(visible_face),
            interactive: self.is_interactive(index),
        })
    }

    /// Snapshot the whole book.
    pub fn frame(&self) -> FrameState {
        let current_page = self.controller.current_page();
        FrameState {
            current_page,
            page_count: self.pages.len(),
            pages: (0..self.pages.len()).filter_map(|i| self.page_state(i)).collect(),
            stacks: self.stacks,
            indicator: (0..self.pages.len()).map(|i| i < current_page).collect(),
            pose: BookPose::at(self.clock.elapsed, &self.config),
        }
    }
}
