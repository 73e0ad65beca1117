#[cfg(not(all(feature = "assets", feature = "export")))]
fn main() {
    eprintln!(
        "The scroller CLI requires the \"assets\" and \"export\" features. Rebuild with default features to enable rendering."
    );
}

#[cfg(all(feature = "assets", feature = "export"))]
mod cli {
    use anyhow::{bail, Context, Result};
    use std::env;
    use std::path::PathBuf;
    use std::time::Instant;

    use scroller::assets::load_demo_assets;
    use scroller::config::FRAME_RATE;
    use scroller::export::{save_frame, WavFrameWriter};
    use scroller::{DemoConfig, DemoEngine, TimingConfig};

    struct Args {
        config: DemoConfig,
        play: bool,
    }

    fn usage() {
        eprintln!("Usage: scroller [OPTIONS]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --config FILE    Load demo configuration from a JSON file");
        eprintln!("  --frames N       Number of frames to render (default 560 = 8s)");
        eprintln!("  --bg FILE        Background pixmap (PPM, 640x200)");
        eprintln!("  --ship FILE      Player ship pixmap (PPM)");
        eprintln!("  --effect FILE    Raw mono s16le PCM effect sample");
        eprintln!("  --wav FILE       Output WAV path (default demo.wav)");
        eprintln!("  --out DIR        Directory for PPM frame dumps (default frames/)");
        eprintln!("  --no-frames      Skip PPM frame dumps");
        eprintln!("  --play           Stream audio to the sound device (streaming feature)");
        eprintln!("  --help           Show this help");
    }

    fn parse_args() -> Result<Option<Args>> {
        let mut config = DemoConfig::default();
        let mut play = false;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            let mut value = |name: &str| -> Result<String> {
                args.next()
                    .with_context(|| format!("{name} requires a value"))
            };
            match arg.as_str() {
                "--config" => {
                    let path = value("--config")?;
                    config = DemoConfig::from_json_file(&path)
                        .with_context(|| format!("reading config {path}"))?;
                }
                "--frames" => {
                    config.frames = value("--frames")?
                        .parse()
                        .context("--frames expects a number")?;
                }
                "--bg" => config.background = Some(PathBuf::from(value("--bg")?)),
                "--ship" => config.ship = Some(PathBuf::from(value("--ship")?)),
                "--effect" => config.effect = Some(PathBuf::from(value("--effect")?)),
                "--wav" => config.wav_path = PathBuf::from(value("--wav")?),
                "--out" => config.output_dir = PathBuf::from(value("--out")?),
                "--no-frames" => config.write_frames = false,
                "--play" => play = true,
                "--help" | "-h" => {
                    usage();
                    return Ok(None);
                }
                other => {
                    usage();
                    bail!("unknown option: {other}");
                }
            }
        }

        Ok(Some(Args { config, play }))
    }

    pub fn run() -> Result<()> {
        let Some(Args { config, play }) = parse_args()? else {
            return Ok(());
        };

        #[cfg(not(feature = "streaming"))]
        if play {
            bail!("--play requires the \"streaming\" feature; rebuild with `--features streaming`");
        }

        let assets = load_demo_assets(&config).context("loading assets")?;
        let mut engine = match &config.notes {
            Some(notes) => DemoEngine::with_script(assets, notes),
            None => DemoEngine::new(assets),
        }
        .context("building engine")?;

        let timing = TimingConfig::default();
        let mut wav = WavFrameWriter::create(&config.wav_path, timing)
            .with_context(|| format!("creating {}", config.wav_path.display()))?;

        if config.write_frames {
            std::fs::create_dir_all(&config.output_dir)
                .with_context(|| format!("creating {}", config.output_dir.display()))?;
        }

        #[cfg(feature = "streaming")]
        let audio_out = if play {
            use scroller::{AudioDevice, RealtimePlayer, StreamConfig};
            let stream_config = StreamConfig::stable(timing.sample_rate);
            let player = RealtimePlayer::new(stream_config)?;
            let device = AudioDevice::new(
                stream_config.sample_rate,
                stream_config.channels,
                player.get_buffer(),
            )
            .context("opening audio device")?;
            Some((player, device))
        } else {
            None
        };

        eprintln!(
            "Rendering {} frames ({:.1}s) at {} fps...",
            config.frames,
            timing.duration_seconds(config.frames),
            FRAME_RATE
        );
        let started = Instant::now();

        for frame in 0..config.frames {
            engine.tick(frame);

            wav.write_frame(engine.audio_frame())
                .context("writing audio")?;

            if config.write_frames {
                let path = config.output_dir.join(format!("frame{frame:06}.ppm"));
                save_frame(engine.frame_buffer(), &path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }

            #[cfg(feature = "streaming")]
            if let Some((player, _)) = &audio_out {
                player.write_frame_blocking(engine.audio_frame());
            }

            if frame % FRAME_RATE as u64 == 0 {
                eprintln!("  {:>4}s rendered", frame / FRAME_RATE as u64);
            }
        }

        wav.finalize().context("finalizing WAV")?;

        #[cfg(feature = "streaming")]
        if let Some((player, device)) = audio_out {
            device.finish();
            device.wait_for_finish();
            let stats = player.get_stats();
            eprintln!(
                "Playback: {} samples, {} overruns",
                stats.samples_played, stats.overrun_count
            );
        }

        eprintln!(
            "Done in {:.2}s: {} -> {}",
            started.elapsed().as_secs_f32(),
            config.frames,
            config.wav_path.display()
        );
        Ok(())
    }
}

#[cfg(all(feature = "assets", feature = "export"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}
