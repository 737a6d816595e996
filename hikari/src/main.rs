use std::path::Path;

use hikari::{
    camera::Camera,
    expect, hikari_info, scene,
    settings::{RenderSettings, SceneType},
};

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        // .level(log::LevelFilter::Debug)
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(std::fs::File::create("hikari.log")?)
        .apply()?;
    Ok(())
}

// Usage: hikari [settings.yaml] [scene]
fn main() {
    if let Err(why) = setup_logger() {
        panic!("{}", why);
    };

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => expect!(
            RenderSettings::load(Path::new(&path)),
            "Failed to load settings"
        ),
        None => RenderSettings::default(),
    };
    if let Some(name) = args.next() {
        settings.scene = expect!(name.parse::<SceneType>(), "Unknown scene");
    }

    let scene = expect!(scene::load(&settings), "Failed to build scene");
    let camera = Camera::new(
        settings.width,
        settings.height,
        settings.fov.to_radians(),
        &scene.view,
    )
    .with_depth(settings.depth)
    .with_samples(settings.samples_per_pixel);

    let pool = expect!(
        rayon::ThreadPoolBuilder::new()
            .num_threads(settings.thread_count())
            .build(),
        "Failed to build thread pool"
    );
    hikari_info!("Rendering with {} threads", pool.current_num_threads());
    let canvas = pool.install(|| camera.render(&scene.world));

    expect!(canvas.write(&settings.output), "Failed to write output");
    hikari_info!("Wrote {}", settings.output.display());
}
