use std::time::Duration;

use campusview_camera::{CameraManipulator, ManipulatorConfig};
use campusview_common::{ParseError, Viewpoint, ViewpointField, format_triple, parse_triple};
use campusview_input::{GestureEvent, GestureTranslator};
use campusview_render::{RenderView, Scene};
use campusview_tools::LookAtReadout;
use campusview_viewpoint::{RegistryError, Transition, ViewpointRegistry};

use crate::config::ScreenConfig;
use crate::task::{AnimationTask, TaskState};

/// Where the applied viewpoint came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Preset(String),
    Custom,
}

/// Errors from screen operations. None of them change the applied viewpoint.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("custom viewpoint is degenerate: eye on target or up-vector parallel to the view")]
    DegenerateCustom,
}

/// State and behavior of the viewer screen.
///
/// Owns the preset registry, the manual-entry viewpoint, the in-flight
/// transition, its animation task, the gesture translator and, while mounted,
/// the camera manipulator.
pub struct ViewerScreen<M> {
    registry: ViewpointRegistry,
    config: ScreenConfig,
    scene: Scene,
    applied: Applied,
    /// Destination of the latest transition; the resting viewpoint when idle.
    applied_viewpoint: Viewpoint,
    custom: Viewpoint,
    controls_visible: bool,
    notice: Option<String>,
    transition: Option<Transition>,
    task: AnimationTask,
    manipulator: Option<M>,
    gestures: GestureTranslator,
    viewport: (u32, u32),
}

impl<M: CameraManipulator> ViewerScreen<M> {
    /// Create an unmounted screen resting on the default preset.
    pub fn new(
        registry: ViewpointRegistry,
        scene: Scene,
        config: ScreenConfig,
    ) -> Result<Self, ScreenError> {
        let key = config
            .default_key
            .clone()
            .unwrap_or_else(|| registry.default_key().to_string());
        let viewpoint = registry.lookup(&key)?;
        let gestures = GestureTranslator::with_config(config.viewport.1 as f32, config.gestures);

        Ok(Self {
            viewport: config.viewport,
            registry,
            config,
            scene,
            applied: Applied::Preset(key),
            applied_viewpoint: viewpoint,
            custom: viewpoint,
            controls_visible: true,
            notice: None,
            transition: None,
            task: AnimationTask::new(),
            manipulator: None,
            gestures,
        })
    }

    /// Attach a manipulator and point it at the current viewpoint.
    pub fn mount(&mut self, mut manipulator: M) {
        manipulator.configure(self.manipulator_config(&self.live_viewpoint()));
        self.manipulator = Some(manipulator);
        self.task = AnimationTask::new();
        if self.transition.is_some() {
            self.task.start();
        }
        self.gestures.reset();
        tracing::debug!("viewer screen mounted");
    }

    /// Tear down: cancel the animation task, settle any transition and
    /// release the manipulator.
    pub fn unmount(&mut self) -> Option<M> {
        self.task.cancel();
        if let Some(t) = self.transition.take() {
            self.applied_viewpoint = t.to();
        }
        self.gestures.reset();
        tracing::debug!("viewer screen unmounted");
        self.manipulator.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.manipulator.is_some()
    }

    /// Begin a transition to a registered preset.
    ///
    /// Unknown keys are reported and ignored. Selecting the preset that is
    /// already applied does nothing.
    pub fn select_preset(&mut self, key: &str) -> Result<(), ScreenError> {
        let viewpoint = match self.registry.lookup(key) {
            Ok(vp) => vp,
            Err(e) => {
                tracing::warn!(key, "preset selection ignored: {e}");
                return Err(e.into());
            }
        };
        if matches!(&self.applied, Applied::Preset(current) if current == key) {
            tracing::trace!(key, "preset already applied");
            return Ok(());
        }

        self.begin_transition(viewpoint);
        self.applied = Applied::Preset(key.to_string());
        tracing::debug!(key, "preset selected");
        Ok(())
    }

    /// Parse one manual-entry field into the custom viewpoint.
    ///
    /// Malformed text keeps the previous value and leaves a notice.
    pub fn set_custom_field(&mut self, field: ViewpointField, text: &str) -> Result<(), ScreenError> {
        match parse_triple(text) {
            Ok(value) => {
                self.custom = self.custom.with_field(field, value);
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(field = field.label(), text, "invalid input: {e}");
                self.notice = Some(format!("{}: {e}", field.label()));
                Err(e.into())
            }
        }
    }

    /// Transition to the custom viewpoint.
    pub fn apply_custom(&mut self) -> Result<(), ScreenError> {
        if self.custom.is_degenerate() {
            self.notice = Some(ScreenError::DegenerateCustom.to_string());
            return Err(ScreenError::DegenerateCustom);
        }
        if self.applied == Applied::Custom && self.custom == self.applied_viewpoint {
            return Ok(());
        }
        self.begin_transition(self.custom);
        self.applied = Applied::Custom;
        tracing::debug!("custom viewpoint applied");
        Ok(())
    }

    /// Advance the animation by `dt`. Returns the viewpoint written this frame.
    pub fn frame(&mut self, dt: Duration) -> Option<Viewpoint> {
        if !self.task.is_running() {
            return None;
        }
        let Some(transition) = self.transition.as_mut() else {
            self.task.finish();
            return None;
        };

        let viewpoint = transition.advance(dt);
        let complete = transition.is_complete();
        self.task.tick();
        self.configure_manipulator(&viewpoint);

        if complete {
            self.transition = None;
            self.task.finish();
            tracing::debug!("transition complete");
        }
        Some(viewpoint)
    }

    /// Route a gesture to the manipulator.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        self.gestures.handle(event, self.manipulator.as_mut());
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.gestures.set_viewport_height(height as f32);
    }

    /// Read the camera's current look-at ("Get Coords").
    pub fn fetch_look_at(&self) -> Option<LookAtReadout> {
        let Some(manipulator) = self.manipulator.as_ref() else {
            tracing::trace!("no camera manipulator; look-at unavailable");
            return None;
        };
        let readout = LookAtReadout::from_look_at(manipulator.get_look_at());
        tracing::info!("camera look-at\n{readout}");
        Some(readout)
    }

    pub fn toggle_controls(&mut self) {
        self.controls_visible = !self.controls_visible;
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Informational message from the last rejected input.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// The viewpoint on screen right now.
    ///
    /// In-flight transition first, then the manipulator, then the resting viewpoint.
    pub fn live_viewpoint(&self) -> Viewpoint {
        if let Some(t) = &self.transition {
            return t.current();
        }
        match &self.manipulator {
            Some(m) => m.viewpoint(),
            None => self.applied_viewpoint,
        }
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::new(self.live_viewpoint()).with_aspect(self.viewport.0, self.viewport.1)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn registry(&self) -> &ViewpointRegistry {
        &self.registry
    }

    pub fn applied(&self) -> &Applied {
        &self.applied
    }

    /// Key of the applied preset, or `None` for a custom viewpoint.
    pub fn applied_key(&self) -> Option<&str> {
        match &self.applied {
            Applied::Preset(key) => Some(key),
            Applied::Custom => None,
        }
    }

    pub fn applied_viewpoint(&self) -> Viewpoint {
        self.applied_viewpoint
    }

    pub fn custom(&self) -> Viewpoint {
        self.custom
    }

    /// Text shown in a manual-entry field.
    pub fn custom_text(&self, field: ViewpointField) -> String {
        format_triple(self.custom.field(field))
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn task_state(&self) -> TaskState {
        self.task.state()
    }

    pub fn manipulator(&self) -> Option<&M> {
        self.manipulator.as_ref()
    }

    pub fn manipulator_mut(&mut self) -> Option<&mut M> {
        self.manipulator.as_mut()
    }

    pub fn gestures(&self) -> &GestureTranslator {
        &self.gestures
    }

    /// Start a transition from wherever the camera is now.
    fn begin_transition(&mut self, to: Viewpoint) {
        let from = self.live_viewpoint();
        self.applied_viewpoint = to;

        if !self.task.start() {
            // Torn down: nothing will animate, settle immediately.
            self.transition = None;
            return;
        }
        self.transition = Some(Transition::begin(from, to, self.config.transition));
    }

    fn manipulator_config(&self, viewpoint: &Viewpoint) -> ManipulatorConfig {
        ManipulatorConfig::from_viewpoint(viewpoint)
            .with_orbit_speed(self.config.orbit_speed)
            .with_zoom_speed(self.config.zoom_speed)
    }

    fn configure_manipulator(&mut self, viewpoint: &Viewpoint) {
        let config = self.manipulator_config(viewpoint);
        match self.manipulator.as_mut() {
            Some(m) => m.configure(config),
            None => tracing::trace!("no camera manipulator; frame skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusview_camera::{ManipulatorCall, OrbitManipulator, Recorder};
    use campusview_render::ModelAsset;
    use glam::Vec3;

    type TestScreen = ViewerScreen<Recorder<OrbitManipulator>>;

    const HALF: Duration = Duration::from_millis(250);
    const FULL: Duration = Duration::from_millis(500);

    fn screen() -> TestScreen {
        ViewerScreen::new(
            ViewpointRegistry::campus(),
            Scene::new(ModelAsset::new("nwssu.glb")),
            ScreenConfig {
                viewport: (400, 800),
                ..ScreenConfig::default()
            },
        )
        .unwrap()
    }

    fn mounted() -> TestScreen {
        let mut s = screen();
        s.mount(Recorder::new(OrbitManipulator::default()));
        s
    }

    fn preset(key: &str) -> Viewpoint {
        ViewpointRegistry::campus().lookup(key).unwrap()
    }

    fn approx(a: Viewpoint, b: Viewpoint) -> bool {
        (a.eye - b.eye).abs().max_element() < 1e-5
            && (a.target - b.target).abs().max_element() < 1e-5
            && (a.up - b.up).abs().max_element() < 1e-5
    }

    #[test]
    fn starts_on_default_preset() {
        let s = screen();
        assert_eq!(s.applied_key(), Some("DEFAULT"));
        assert_eq!(s.applied_viewpoint(), preset("DEFAULT"));
        assert_eq!(s.custom(), preset("DEFAULT"));
        assert!(s.controls_visible());
        assert!(!s.is_mounted());
    }

    #[test]
    fn unknown_default_key_fails() {
        let result = TestScreen::new(
            ViewpointRegistry::campus(),
            Scene::new(ModelAsset::new("m.glb")),
            ScreenConfig {
                default_key: Some("NOPE".into()),
                ..ScreenConfig::default()
            },
        );
        assert!(matches!(result, Err(ScreenError::Registry(RegistryError::NotFound(_)))));
    }

    #[test]
    fn mount_configures_manipulator() {
        let s = mounted();
        let rec = s.manipulator().unwrap();
        assert!(matches!(rec.calls()[0], ManipulatorCall::Configure(_)));
        assert_eq!(rec.viewpoint(), preset("DEFAULT"));
    }

    #[test]
    fn selecting_preset_animates_to_it() {
        let mut s = mounted();
        s.select_preset("COM").unwrap();
        assert_eq!(s.task_state(), TaskState::Running);
        assert_eq!(s.applied_key(), Some("COM"));

        s.frame(HALF);
        assert!(s.transition().is_some());
        let end = s.frame(HALF).unwrap();

        assert_eq!(end, preset("COM"));
        assert!(s.transition().is_none());
        assert_eq!(s.task_state(), TaskState::Idle);
        assert_eq!(s.manipulator().unwrap().viewpoint(), preset("COM"));
        assert_eq!(s.frame(HALF), None);
    }

    #[test]
    fn unknown_preset_changes_nothing() {
        let mut s = mounted();
        s.select_preset("COED").unwrap();
        s.frame(HALF / 2);
        let before_transition = s.transition().copied();
        let before_applied = s.applied().clone();
        let before_vp = s.applied_viewpoint();

        let err = s.select_preset("UNKNOWN").unwrap_err();
        assert!(matches!(err, ScreenError::Registry(RegistryError::NotFound(_))));
        assert_eq!(s.transition().copied(), before_transition);
        assert_eq!(s.applied(), &before_applied);
        assert_eq!(s.applied_viewpoint(), before_vp);
    }

    #[test]
    fn reselecting_applied_preset_is_a_no_op() {
        let mut s = mounted();
        s.select_preset("DEFAULT").unwrap();
        assert!(s.transition().is_none());
        assert_eq!(s.task_state(), TaskState::Idle);
    }

    #[test]
    fn superseding_starts_from_live_position() {
        let mut s = mounted();
        s.select_preset("CCIS").unwrap();
        s.frame(HALF);
        let halfway = preset("DEFAULT").lerp(&preset("CCIS"), 0.5);

        s.select_preset("COED").unwrap();
        let t = s.transition().unwrap();
        assert!(approx(t.from(), halfway));
        assert_ne!(t.from(), preset("DEFAULT"));
        assert_eq!(t.to(), preset("COED"));
        assert_eq!(t.elapsed(), Duration::ZERO);
    }

    #[test]
    fn idle_transition_starts_from_manipulator() {
        let mut s = mounted();
        s.handle_gesture(GestureEvent::PanBegin {
            x: 100.0,
            y: 100.0,
            pointers: 1,
        });
        s.handle_gesture(GestureEvent::PanUpdate {
            x: 250.0,
            y: 100.0,
            pointers: 1,
        });
        s.handle_gesture(GestureEvent::PanEnd);
        let orbited = s.manipulator().unwrap().viewpoint();
        assert_ne!(orbited, preset("DEFAULT"));

        s.select_preset("COM").unwrap();
        assert_eq!(s.transition().unwrap().from(), orbited);
    }

    #[test]
    fn pan_reaches_manipulator_with_flipped_y() {
        let mut s = mounted();
        s.handle_gesture(GestureEvent::PanBegin {
            x: 10.0,
            y: 50.0,
            pointers: 1,
        });
        let last = *s.manipulator().unwrap().calls().last().unwrap();
        assert_eq!(
            last,
            ManipulatorCall::GrabBegin {
                x: 10.0,
                y: 750.0,
                pan_mode: false
            }
        );
    }

    #[test]
    fn resize_updates_gesture_height() {
        let mut s = mounted();
        s.resize(1024, 600);
        assert_eq!(s.gestures().viewport_height(), 600.0);
        assert_eq!(s.render_view().aspect, 1024.0 / 600.0);
    }

    #[test]
    fn custom_entry_parses_and_applies() {
        let mut s = mounted();
        s.set_custom_field(ViewpointField::Eye, "1,2,3").unwrap();
        assert_eq!(s.custom().eye, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.custom_text(ViewpointField::Eye), "1, 2, 3");

        s.apply_custom().unwrap();
        assert_eq!(s.applied(), &Applied::Custom);
        s.frame(FULL);
        assert_eq!(s.manipulator().unwrap().viewpoint().eye, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn malformed_entry_keeps_previous_custom() {
        let mut s = mounted();
        s.set_custom_field(ViewpointField::Target, "4,5,6").unwrap();
        let before = s.custom();

        assert!(matches!(
            s.set_custom_field(ViewpointField::Target, "1,2"),
            Err(ScreenError::Parse(ParseError::ComponentCount(2)))
        ));
        assert!(s.set_custom_field(ViewpointField::Target, "1,a,3").is_err());
        assert_eq!(s.custom(), before);
        assert!(s.notice().unwrap().starts_with("Target Position"));

        s.set_custom_field(ViewpointField::Target, "0,0,0").unwrap();
        assert!(s.notice().is_none());
    }

    #[test]
    fn malformed_entry_does_not_touch_applied() {
        let mut s = mounted();
        let _ = s.set_custom_field(ViewpointField::Up, "x,y,z");
        assert_eq!(s.applied_key(), Some("DEFAULT"));
        assert!(s.transition().is_none());
    }

    #[test]
    fn degenerate_custom_is_refused() {
        let mut s = mounted();
        s.set_custom_field(ViewpointField::Eye, "0,5,0").unwrap();
        s.set_custom_field(ViewpointField::Target, "0,0,0").unwrap();
        s.set_custom_field(ViewpointField::Up, "0,1,0").unwrap();
        assert!(matches!(s.apply_custom(), Err(ScreenError::DegenerateCustom)));
        assert_eq!(s.applied_key(), Some("DEFAULT"));
        assert!(s.notice().is_some());
    }

    #[test]
    fn unmount_cancels_and_releases() {
        let mut s = mounted();
        s.select_preset("CCIS").unwrap();
        s.frame(HALF / 2);

        let rec = s.unmount().unwrap();
        let calls_at_release = rec.calls().len();
        assert_eq!(s.task_state(), TaskState::Cancelled);
        assert!(s.transition().is_none());
        assert_eq!(s.applied_viewpoint(), preset("CCIS"));

        assert_eq!(s.frame(HALF), None);
        s.handle_gesture(GestureEvent::PanEnd);
        assert!(s.fetch_look_at().is_none());
        assert_eq!(rec.calls().len(), calls_at_release);
    }

    #[test]
    fn selection_after_unmount_settles_immediately() {
        let mut s = mounted();
        s.unmount();
        s.select_preset("COM").unwrap();
        assert!(s.transition().is_none());
        assert_eq!(s.live_viewpoint(), preset("COM"));
    }

    #[test]
    fn remount_restores_animation() {
        let mut s = mounted();
        s.unmount();
        s.mount(Recorder::new(OrbitManipulator::default()));
        assert_eq!(s.task_state(), TaskState::Idle);
        s.select_preset("COED").unwrap();
        assert_eq!(s.task_state(), TaskState::Running);
    }

    #[test]
    fn unmounted_screen_still_animates_state() {
        let mut s = screen();
        s.select_preset("COM").unwrap();
        assert_eq!(s.frame(FULL), Some(preset("COM")));
        assert_eq!(s.live_viewpoint(), preset("COM"));
    }

    #[test]
    fn fetch_look_at_reads_manipulator() {
        let s = mounted();
        let readout = s.fetch_look_at().unwrap();
        assert_eq!(readout.viewpoint(), preset("DEFAULT"));
    }

    #[test]
    fn toggle_controls_flips() {
        let mut s = screen();
        s.toggle_controls();
        assert!(!s.controls_visible());
        s.toggle_controls();
        assert!(s.controls_visible());
    }
}
