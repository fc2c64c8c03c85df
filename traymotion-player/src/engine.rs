//! The owned pipeline context shared by every shell operation

use crate::{AnimationScheduler, Error, IconSurface, Result, SchedulerState, TickTimer, TickToken};
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use traymotion_core::settings::clamp_size;
use traymotion_core::{AppPaths, ProfileKind, ProfileStore, RenderSequence, Settings, SourceFormat};
use traymotion_encoder::{AssetProcessor, CropRect, EncoderConfig};

/// One-line state shown in the tray menu header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub profile: ProfileKind,
    pub label: &'static str,
    pub size: u32,
    pub frames: usize,
    pub max_frames: usize,
    pub state: SchedulerState,
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Size: {}px | Frames: {}/{}",
            self.label, self.size, self.frames, self.max_frames
        )
    }
}

/// Settings, profile selection, the live render sequence and the scheduler.
///
/// Every operation that replaces the sequence first stops the scheduler,
/// then swaps the sequence, then restarts it.
pub struct AnimationEngine<T: TickTimer, S: IconSurface> {
    paths: AppPaths,
    settings: Settings,
    profiles: ProfileStore,
    sequence: Arc<RenderSequence>,
    scheduler: AnimationScheduler<T>,
    surface: S,
}

impl<T: TickTimer, S: IconSurface> AnimationEngine<T, S> {
    /// Creates an engine, reading settings from `paths`. Nothing is loaded yet.
    pub fn new(paths: AppPaths, timer: T, surface: S) -> Self {
        let settings = Settings::load(&paths.settings);
        Self {
            profiles: ProfileStore::new(settings.performance_mode),
            settings,
            paths,
            sequence: Arc::new(RenderSequence::default()),
            scheduler: AnimationScheduler::new(timer),
            surface,
        }
    }

    /// Sniffs a source and decodes a preview bitmap for the editor
    pub fn detect_and_load(&self, data: &[u8]) -> Result<(SourceFormat, RgbaImage)> {
        Ok(traymotion_decoder::detect_and_load(data)?)
    }

    /// Crops and re-encodes `source` into the stored asset, then reloads.
    ///
    /// The new display size is stored only once the asset is written. On
    /// failure the settings, the stored asset and the playing animation are
    /// left as they were.
    pub fn process_and_save(&mut self, source: &Path, crop: CropRect, display_size: u32) -> Result<()> {
        let size = clamp_size(display_size);
        let processor = AssetProcessor::new(
            EncoderConfig {
                display_size: size,
                ..EncoderConfig::default()
            },
            self.profiles.active(),
        );
        processor.process_and_save(source, crop, &self.paths.asset)?;

        self.settings.size = size;
        self.persist_settings();
        self.reload()
    }

    /// Selects a profile by name and persists it; takes effect on next load
    pub fn select_profile(&mut self, name: &str) -> ProfileKind {
        let kind = ProfileKind::parse_or_default(name);
        self.profiles.select(kind);
        self.settings.performance_mode = kind;
        self.persist_settings();
        tracing::info!(profile = %kind, "Performance profile selected");
        kind
    }

    /// Stops, re-decodes the stored asset at the current size and profile, restarts.
    ///
    /// If decoding fails the previous sequence is restarted unchanged.
    pub fn reload(&mut self) -> Result<()> {
        self.scheduler.stop();

        match self.build_sequence() {
            Ok(sequence) => {
                tracing::info!(
                    frames = sequence.len(),
                    size = self.settings.size,
                    profile = %self.profiles.selected(),
                    "Icon reloaded"
                );
                self.scheduler.release();
                self.sequence = Arc::new(sequence);
                self.scheduler
                    .start(Arc::clone(&self.sequence), &mut self.surface);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reload failed, keeping current icon");
                self.scheduler
                    .start(Arc::clone(&self.sequence), &mut self.surface);
                Err(e)
            }
        }
    }

    fn build_sequence(&self) -> Result<RenderSequence> {
        if !self.paths.has_asset() {
            return Err(Error::NoAsset(self.paths.asset.clone()));
        }
        let data = std::fs::read(&self.paths.asset)?;
        let sequence = traymotion_decoder::load_render_sequence(
            &data,
            self.settings.size,
            self.profiles.active(),
        )?;
        Ok(sequence)
    }

    /// Delivers a fired timer tick to the scheduler
    pub fn on_tick(&mut self, token: TickToken) -> bool {
        self.scheduler.on_tick(token, &mut self.surface)
    }

    /// Stops the animation and drops the render sequence; call before exit
    pub fn shutdown(&mut self) {
        self.scheduler.release();
        self.sequence = Arc::new(RenderSequence::default());
        tracing::info!("Animation engine shut down");
    }

    /// Profile, size and frame counts for display
    pub fn status(&self) -> StatusSummary {
        let profile = self.profiles.active();
        StatusSummary {
            profile: self.profiles.selected(),
            label: profile.label,
            size: self.settings.size,
            frames: self.sequence.len(),
            max_frames: profile.max_frames,
            state: self.scheduler.state(),
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.paths.settings) {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sequence(&self) -> &Arc<RenderSequence> {
        &self.sequence
    }

    pub fn scheduler(&self) -> &AnimationScheduler<T> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AnimationScheduler<T> {
        &mut self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
