//! Audio cues
//!
//! The simulation never touches audio; the loop turns [`GameEvent`]s into
//! cue calls on an [`AudioSink`]. Without the `audio` feature, or without
//! sound files on disk, every cue is a silent no-op.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Answer matched
    Correct,
    /// Answer did not match
    Wrong,
    /// Countdown ran out
    GameOver,
}

/// Something that can play cues and background music
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Cue to play for an event, if any
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::AnswerCorrect { .. } => Some(AudioCue::Correct),
        GameEvent::AnswerWrong { .. } => Some(AudioCue::Wrong),
        GameEvent::GameOver => Some(AudioCue::GameOver),
        _ => None,
    }
}

/// Forward a tick's events to the sink
pub fn dispatch(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::SessionStarted => sink.start_music(),
            GameEvent::Restarted | GameEvent::Quit => sink.stop_music(),
            _ => {
                if let Some(cue) = cue_for(event) {
                    sink.play(cue);
                }
            }
        }
    }
}

/// Best available sink for these settings
pub fn open(settings: &Settings) -> Box<dyn AudioSink> {
    if settings.muted {
        log::info!("Audio muted");
        return Box::new(SilentAudio);
    }

    #[cfg(feature = "audio")]
    {
        match kira_backend::AssetAudio::new(settings) {
            Ok(audio) => return Box::new(audio),
            Err(err) => log::warn!("Failed to start audio - audio disabled: {err}"),
        }
    }

    #[cfg(not(feature = "audio"))]
    log::info!("Built without the `audio` feature - audio disabled");

    Box::new(SilentAudio)
}

#[cfg(feature = "audio")]
pub use kira_backend::AssetAudio;

#[cfg(feature = "audio")]
mod kira_backend {
    use std::collections::HashMap;
    use std::error::Error;
    use std::path::Path;

    use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
    use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};

    use super::{AudioCue, AudioSink};
    use crate::assets;
    use crate::settings::Settings;

    fn to_decibels(amplitude: f32) -> Decibels {
        if amplitude <= 0.0 {
            Decibels::SILENCE
        } else {
            Decibels(20.0 * amplitude.log10())
        }
    }

    fn load(path: &Path, amplitude: f32) -> Option<StaticSoundData> {
        match StaticSoundData::from_file(path) {
            Ok(data) => Some(data.volume(to_decibels(amplitude))),
            Err(err) => {
                log::warn!("Skipping {}: {err}", path.display());
                None
            }
        }
    }

    /// Plays cue sounds and music from files in the asset directory
    pub struct AssetAudio {
        manager: AudioManager<DefaultBackend>,
        cues: HashMap<AudioCue, StaticSoundData>,
        music: Option<StaticSoundData>,
        music_handle: Option<StaticSoundHandle>,
    }

    impl AssetAudio {
        pub fn new(settings: &Settings) -> Result<Self, Box<dyn Error>> {
            let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;
            let dir = settings.asset_dir.as_path();
            let sfx = settings.effective_sfx_volume();

            let mut cues = HashMap::new();
            for (cue, name) in [
                (AudioCue::Correct, assets::SOUND_CORRECT),
                (AudioCue::Wrong, assets::SOUND_WRONG),
                (AudioCue::GameOver, assets::SOUND_GAME_OVER),
            ] {
                if let Some(data) = assets::find_first(dir, &[name]).and_then(|p| load(&p, sfx)) {
                    cues.insert(cue, data);
                }
            }

            let music = assets::find_first(dir, &assets::BACKGROUND_MUSIC)
                .and_then(|p| load(&p, settings.effective_music_volume()))
                .map(|data| data.loop_region(..));

            log::info!(
                "Audio ready: {} cue sounds, music {}",
                cues.len(),
                if music.is_some() { "on" } else { "off" }
            );
            Ok(Self {
                manager,
                cues,
                music,
                music_handle: None,
            })
        }
    }

    impl AudioSink for AssetAudio {
        fn play(&mut self, cue: AudioCue) {
            let Some(data) = self.cues.get(&cue) else { return };
            if let Err(err) = self.manager.play(data.clone()) {
                log::debug!("Failed to play {cue:?}: {err}");
            }
        }

        fn start_music(&mut self) {
            self.stop_music();
            let Some(music) = &self.music else { return };
            match self.manager.play(music.clone()) {
                Ok(handle) => self.music_handle = Some(handle),
                Err(err) => log::debug!("Failed to start music: {err}"),
            }
        }

        fn stop_music(&mut self) {
            if let Some(mut handle) = self.music_handle.take() {
                handle.stop(Tween::default());
            }
        }
    }
}
