use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::info;

use neu_engine::{Engine, EngineConfig, HeadlessRenderer, Object, Renderer, Scene};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    let mut config = match &options.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(assets) = options.assets {
        config.asset_root = assets;
    }

    let mut engine = Engine::new(config);
    let mut scene = Scene::default();
    scene
        .load(&options.scene, &engine)
        .with_context(|| format!("failed to load scene {}", options.scene.display()))?;

    println!(
        "Loaded scene '{}' with {} actors",
        scene.name(),
        scene.len()
    );
    for actor in scene.actors() {
        println!(
            " - {} [{}] components={}",
            actor.name(),
            actor.tag,
            actor.component_count()
        );
    }

    scene.start();
    let (width, height) = (engine.config().width, engine.config().height);
    let mut renderer = HeadlessRenderer::new(width, height);
    for _ in 0..options.frames {
        let dt = engine.step(options.dt);
        scene.update(dt);
        renderer.clear();
        scene.draw(&mut renderer);
        renderer.present();
    }
    info!("Simulated {:.3}s", engine.time().time());

    println!(
        "Ran {} frame(s), {} draw call(s)",
        renderer.frames(),
        renderer.total_draw_calls()
    );
    for actor in scene.actors() {
        let position = actor.transform.position;
        println!(
            " - {} pos=({:.2}, {:.2}, {:.2})",
            actor.name(),
            position.x,
            position.y,
            position.z
        );
    }

    scene.destroyed();
    engine.shutdown();
    Ok(())
}

struct CliOptions {
    scene: PathBuf,
    frames: u32,
    dt: f32,
    assets: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(scene) = args.next() else {
            return Err(anyhow!(
                "Usage: neu-engine <scene.json> [--frames N] [--dt SECONDS] [--assets DIR] [--config FILE]"
            ));
        };
        let mut options = Self {
            scene: PathBuf::from(scene),
            frames: 1,
            dt: 1.0 / 60.0,
            assets: None,
            config: None,
        };
        while let Some(arg) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| anyhow!("Missing value for {arg}"))
            };
            match arg.as_str() {
                "--frames" => {
                    options.frames = value()?
                        .parse()
                        .context("--frames expects a whole number")?;
                }
                "--dt" => {
                    options.dt = value()?.parse().context("--dt expects seconds")?;
                }
                "--assets" => options.assets = Some(PathBuf::from(value()?)),
                "--config" => options.config = Some(PathBuf::from(value()?)),
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --frames, --dt, --assets or --config"
                    ));
                }
            }
        }
        Ok(options)
    }
}
