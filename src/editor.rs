// Audio editor facade
//
// Wires the buffer store, selection, viewport and playback controller into
// the operation set a presentation layer drives, and publishes every state
// change on the event channel. Ordering discipline: edits stop playback
// before touching the buffer, and loading a new file cancels everything
// unconditionally.

use std::sync::{Arc, Mutex};

use ringbuf::traits::Producer;

use crate::buffer::{BufferStore, SampleBuffer};
use crate::codec::{decode_bytes, encode_wav};
use crate::config::EditorConfig;
use crate::edit::engine;
use crate::edit::{HandleSide, Selection};
use crate::error::{DecodeError, EditError, ExportError, PlaybackError};
use crate::messaging::channels::{
    create_event_channel, create_notification_channel, EventConsumer, EventProducer,
    NotificationConsumer, NotificationProducer,
};
use crate::messaging::event::EditorEvent;
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::playback::controller::{PlayRegion, PlaybackController, PlaybackTick};
use crate::playback::cpal_sink::CpalSink;
use crate::playback::sink::PlaybackSink;
use crate::playback::PlaybackState;
use crate::view::waveform::{visible_peaks, WaveformPeaks};
use crate::view::Viewport;

/// Consumer ends of the editor's outbound channels; hand these to the
/// presentation layer.
pub struct EditorChannels {
    pub events: EventConsumer,
    pub notifications: NotificationConsumer,
}

/// The sample-accurate audio editing session.
pub struct AudioEditor {
    config: EditorConfig,
    store: BufferStore,
    selection: Selection,
    viewport: Viewport,
    controller: PlaybackController,
    events: EventProducer,
    notifications: Arc<Mutex<NotificationProducer>>,
}

impl AudioEditor {
    /// Create an editor playing through the default audio output device.
    pub fn new(config: EditorConfig) -> Result<(Self, EditorChannels), PlaybackError> {
        let (notification_tx, notification_rx) = create_notification_channel(64);
        let notification_tx = Arc::new(Mutex::new(notification_tx));
        let sink = CpalSink::new(Arc::clone(&notification_tx))?;
        Ok(Self::build(
            config,
            Box::new(sink),
            notification_tx,
            notification_rx,
        ))
    }

    /// Create an editor over a caller-provided sink (offline rendering,
    /// tests, custom outputs).
    pub fn with_sink(
        config: EditorConfig,
        sink: Box<dyn PlaybackSink>,
    ) -> (Self, EditorChannels) {
        let (notification_tx, notification_rx) = create_notification_channel(64);
        Self::build(
            config,
            sink,
            Arc::new(Mutex::new(notification_tx)),
            notification_rx,
        )
    }

    fn build(
        config: EditorConfig,
        sink: Box<dyn PlaybackSink>,
        notifications: Arc<Mutex<NotificationProducer>>,
        notification_rx: NotificationConsumer,
    ) -> (Self, EditorChannels) {
        let (event_tx, event_rx) = create_event_channel(256);
        let editor = Self {
            store: BufferStore::new(),
            selection: Selection::new(),
            viewport: Viewport::new(config.min_zoom, config.max_zoom),
            controller: PlaybackController::new(sink, config.min_playback_region_secs),
            events: event_tx,
            notifications,
            config,
        };
        (
            editor,
            EditorChannels {
                events: event_rx,
                notifications: notification_rx,
            },
        )
    }

    // ---- state accessors ----------------------------------------------

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn active_buffer(&self) -> Option<&Arc<SampleBuffer>> {
        self.store.active()
    }

    pub fn duration_secs(&self) -> f64 {
        self.store.duration_secs()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn position_secs(&self) -> f64 {
        self.controller.position_secs()
    }

    // ---- file lifecycle -----------------------------------------------

    /// Decode container bytes and start a fresh session. On success any
    /// in-flight playback is cancelled and selection, zoom and playback
    /// offset are discarded; on failure the prior session is untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let buffer = match decode_bytes(bytes) {
            Ok(buffer) => buffer,
            Err(e) => {
                self.notify(Notification::error(
                    NotificationCategory::Decode,
                    format!("Could not load audio: {e}"),
                ));
                return Err(e);
            }
        };

        log::info!(
            "loaded audio: {:.3}s, {} Hz, {} channel(s)",
            buffer.duration_secs(),
            buffer.sample_rate(),
            buffer.num_channels()
        );

        self.controller.reset();
        self.emit(EditorEvent::PlaybackStateChanged(PlaybackState::Idle));
        self.store.load(buffer);
        self.selection.reset();
        self.viewport.reset();
        self.emit_buffer_replaced();
        self.emit_selection_changed();
        self.emit_view_changed();
        self.notify(Notification::info(
            NotificationCategory::Decode,
            "Audio loaded successfully".to_string(),
        ));
        Ok(())
    }

    /// Serialize the active buffer to canonical 16-bit PCM WAV bytes.
    pub fn export_wav(&self) -> Result<Vec<u8>, ExportError> {
        let buffer = match self.store.active() {
            Some(buffer) => buffer,
            None => {
                self.notify(Notification::error(
                    NotificationCategory::Export,
                    "Nothing to export: no audio is loaded".to_string(),
                ));
                return Err(ExportError::NoAudioLoaded);
            }
        };
        encode_wav(buffer).map_err(|e| {
            self.notify(Notification::error(
                NotificationCategory::Export,
                format!("Export failed: {e}"),
            ));
            e
        })
    }

    // ---- view ---------------------------------------------------------

    /// Per-pixel min/max pairs for the currently visible window, or `None`
    /// with no file loaded.
    pub fn waveform_peaks(&self, width_px: usize) -> Option<WaveformPeaks> {
        self.store
            .active()
            .map(|buffer| visible_peaks(buffer, &self.viewport, width_px))
    }

    /// Interpret a pointer position as buffer time (unclamped).
    pub fn screen_x_to_time(&self, pixel_x: f64, canvas_width: f64) -> f64 {
        self.viewport
            .screen_x_to_time(self.store.duration_secs(), pixel_x, canvas_width)
    }

    pub fn set_zoom(&mut self, level: f64) {
        self.viewport.set_zoom(level);
        self.emit_view_changed();
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.viewport.set_offset(offset);
        self.emit_view_changed();
    }

    // ---- selection ----------------------------------------------------

    /// Move a trim handle to `percent` of the full duration. Ignored with
    /// no file loaded; handle crossing and the minimum separation are
    /// enforced by the selection itself.
    pub fn set_trim_handle(&mut self, side: HandleSide, percent: f64) {
        let duration = self.store.duration_secs();
        if duration <= 0.0 {
            return;
        }
        let min_separation_pct =
            (self.config.min_handle_separation_secs / duration * 100.0).min(100.0);
        self.selection.set_handle(side, percent, min_separation_pct);
        self.emit_selection_changed();
    }

    fn selection_region(&self) -> PlayRegion {
        let (start_secs, end_secs) = self.selection.region_secs(self.store.duration_secs());
        PlayRegion {
            start_secs,
            end_secs,
        }
    }

    // ---- edits --------------------------------------------------------

    /// Splice the selected region out of the active buffer. Stops playback
    /// first; on success the selection resets to the full (shorter) range
    /// and the playback position to its start.
    pub fn delete_selection(&mut self) -> Result<(), EditError> {
        let buffer = match self.store.active() {
            Some(buffer) => Arc::clone(buffer),
            None => return self.edit_failed(EditError::NoAudioLoaded),
        };
        self.halt_playback(0.0);

        let region = self.selection_region();
        let result = engine::delete_region(
            &buffer,
            region.start_secs,
            region.end_secs,
            self.config.min_delete_region_secs,
        );
        match result {
            Ok(new_buffer) => {
                log::info!(
                    "deleted {:.3}s, {:.3}s remaining",
                    region.len_secs(),
                    new_buffer.duration_secs()
                );
                self.install_edited(new_buffer, true);
                Ok(())
            }
            Err(e) => self.edit_failed(e),
        }
    }

    /// Keep only the selected region (the original tool's "trim" button).
    pub fn trim_to_selection(&mut self) -> Result<(), EditError> {
        let buffer = match self.store.active() {
            Some(buffer) => Arc::clone(buffer),
            None => return self.edit_failed(EditError::NoAudioLoaded),
        };
        self.halt_playback(0.0);

        let region = self.selection_region();
        let result = engine::extract_region(
            &buffer,
            region.start_secs,
            region.end_secs,
            self.config.min_delete_region_secs,
        );
        match result {
            Ok(new_buffer) => {
                self.install_edited(new_buffer, true);
                Ok(())
            }
            Err(e) => self.edit_failed(e),
        }
    }

    /// Scale the active buffer's amplitude, hard-clamped to [-1, 1]. The
    /// length is unchanged so the selection is kept.
    pub fn apply_gain(&mut self, gain: f32) -> Result<(), EditError> {
        let buffer = match self.store.active() {
            Some(buffer) => Arc::clone(buffer),
            None => return self.edit_failed(EditError::NoAudioLoaded),
        };
        self.halt_playback(self.selection_region().start_secs);
        self.install_edited(engine::apply_gain(&buffer, gain), false);
        Ok(())
    }

    /// Resample the active buffer for a playback-rate change. The length
    /// changes, so the selection resets like any length-changing edit.
    pub fn change_speed(&mut self, rate: f64) -> Result<(), EditError> {
        let buffer = match self.store.active() {
            Some(buffer) => Arc::clone(buffer),
            None => return self.edit_failed(EditError::NoAudioLoaded),
        };
        self.halt_playback(0.0);
        match engine::change_speed(&buffer, rate) {
            Ok(new_buffer) => {
                self.install_edited(new_buffer, true);
                Ok(())
            }
            Err(e) => self.edit_failed(e),
        }
    }

    /// Undo all edits in one step. Silent no-op with no file loaded.
    pub fn reset_to_original(&mut self) {
        if !self.store.is_loaded() {
            return;
        }
        self.halt_playback(0.0);
        self.store.reset();
        self.selection.reset();
        self.emit_buffer_replaced();
        self.emit_selection_changed();
        self.notify(Notification::info(
            NotificationCategory::Edit,
            "Restored original audio".to_string(),
        ));
    }

    fn install_edited(&mut self, new_buffer: SampleBuffer, reset_selection: bool) {
        self.store.replace(new_buffer);
        if reset_selection {
            self.selection.reset();
            self.emit_selection_changed();
        }
        self.emit_buffer_replaced();
    }

    fn edit_failed(&mut self, e: EditError) -> Result<(), EditError> {
        self.notify(Notification::error(
            NotificationCategory::Edit,
            e.to_string(),
        ));
        Err(e)
    }

    // ---- playback -----------------------------------------------------

    /// Start playback of the selected region, from `from` when given, from
    /// the pause point when paused, otherwise from the region start.
    /// Returns the actual (clamped) start position.
    pub fn play(&mut self, from: Option<f64>) -> Result<f64, PlaybackError> {
        let buffer = match self.store.active() {
            Some(buffer) => Arc::clone(buffer),
            None => return self.playback_failed(PlaybackError::NoAudioLoaded),
        };
        let region = self.selection_region();
        match self.controller.play(&buffer, region, from) {
            Ok(actual) => {
                self.emit(EditorEvent::PlaybackStateChanged(PlaybackState::Playing));
                Ok(actual)
            }
            Err(e) => self.playback_failed(e),
        }
    }

    pub fn pause(&mut self) {
        if !self.controller.state().is_playing() {
            return;
        }
        self.controller.pause();
        self.emit(EditorEvent::PlaybackStateChanged(PlaybackState::Paused));
    }

    /// Stop playback; the position returns to the start of the current
    /// selection, not to zero.
    pub fn stop_playback(&mut self) {
        self.halt_playback(self.selection_region().start_secs);
    }

    /// Move the playback position, restarting the source when playing.
    pub fn seek(&mut self, time_secs: f64) -> Result<f64, PlaybackError> {
        let buffer = match self.store.active() {
            Some(buffer) => Arc::clone(buffer),
            None => return self.playback_failed(PlaybackError::NoAudioLoaded),
        };
        let region = self.selection_region();
        match self.controller.seek(&buffer, region, time_secs) {
            Ok(position) => Ok(position),
            Err(e) => self.playback_failed(e),
        }
    }

    /// Position poll; call once per visual update. While playing this
    /// publishes the indicator position and eases the view toward the
    /// playback position when it leaves the visible window.
    pub fn tick(&mut self) -> Option<PlaybackTick> {
        let tick = self.controller.tick()?;
        let duration = self.store.duration_secs();

        if tick.finished {
            self.emit(EditorEvent::PlaybackStateChanged(PlaybackState::Idle));
        } else if duration > 0.0 {
            let fraction = tick.position_secs / duration;
            if !self.viewport.contains_fraction(fraction) {
                let target = self.viewport.centering_offset(fraction);
                self.viewport
                    .ease_toward(target, self.config.autoscroll_easing);
                self.emit_view_changed();
            }
        }

        let percent_x = self.viewport.time_to_percent(duration, tick.position_secs);
        self.emit(EditorEvent::PositionChanged {
            seconds: tick.position_secs,
            percent_x,
        });
        Some(tick)
    }

    fn halt_playback(&mut self, offset_secs: f64) {
        let was_idle = self.controller.state().is_idle();
        self.controller.stop(offset_secs);
        if !was_idle {
            self.emit(EditorEvent::PlaybackStateChanged(PlaybackState::Idle));
        }
    }

    fn playback_failed<T>(&mut self, e: PlaybackError) -> Result<T, PlaybackError> {
        self.notify(Notification::error(
            NotificationCategory::Playback,
            e.to_string(),
        ));
        Err(e)
    }

    // ---- channels -----------------------------------------------------

    fn emit(&mut self, event: EditorEvent) {
        // A full channel means the consumer is gone or stalled; dropping
        // the event is the correct behavior for transient state updates.
        let _ = self.events.try_push(event);
    }

    fn emit_buffer_replaced(&mut self) {
        if let Some(buffer) = self.store.active() {
            let event = EditorEvent::BufferReplaced {
                duration_secs: buffer.duration_secs(),
                sample_rate: buffer.sample_rate(),
                channels: buffer.num_channels(),
            };
            self.emit(event);
        }
    }

    fn emit_selection_changed(&mut self) {
        let event = EditorEvent::SelectionChanged {
            left_pct: self.selection.left_pct(),
            right_pct: self.selection.right_pct(),
        };
        self.emit(event);
    }

    fn emit_view_changed(&mut self) {
        let event = EditorEvent::ViewChanged {
            zoom_level: self.viewport.zoom_level(),
            zoom_offset: self.viewport.zoom_offset(),
        };
        self.emit(event);
    }

    fn notify(&self, notification: Notification) {
        if let Ok(mut tx) = self.notifications.lock() {
            let _ = tx.try_push(notification);
        }
    }
}
