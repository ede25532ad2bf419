use anyhow::{Context, Result, bail};
use canvas_text::engine::face::{
    DirectoryFaceSource, FaceSourceChain, ResourceFaceSource, SystemFontSource,
};
use canvas_text::engine::style::{FontSlant, FontWeight};
use canvas_text::engine::{
    EngineOptions, FaceKey, FaceRegistry, RecordingSurface, TextLayoutEngine,
};
use canvas_text::platform::ttf::{ASCII_CHARSET, face_data_from_font};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

/// 顔ファイルのディレクトリを指定する環境変数
const FACES_ENV: &str = "CANVAS_TEXT_FACES";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--convert") {
        return convert(&args[1..]);
    }

    let text = args.first().cloned().unwrap_or_else(|| "ABox?".to_string());
    let font = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "32 demo".to_string());
    let faces_dir = args
        .get(2)
        .cloned()
        .or_else(|| env::var(FACES_ENV).ok())
        .map(PathBuf::from);

    let options = EngineOptions::from_env();
    let mut chain = FaceSourceChain::new();
    if let Some(dir) = &faces_dir {
        chain = chain.with(DirectoryFaceSource::new(dir));
    }
    let chain = chain
        .with(ResourceFaceSource::new())
        .with(SystemFontSource::new(ASCII_CHARSET));
    let faces = Arc::new(FaceRegistry::new(chain));

    let mut surface = RecordingSurface::new();
    surface.font = font;
    let engine = TextLayoutEngine::for_surface(Arc::clone(&faces), options, &mut surface);

    // 指定ディレクトリの顔は先に読み込んでおく
    if let Some(dir) = &faces_dir {
        let style = engine.computed_style(&surface);
        let key = FaceKey::new(style.family(), style.weight(), style.slant());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let loaded = runtime.block_on(faces.preload(dir, &[key]))?;
        log::info!(target: "Main", "preloaded {loaded} face(s) from {}", dir.display());
    }

    let metrics = engine.measure_text(&mut surface, &text)?;
    let baseline = metrics.height.max(32.0);
    engine.fill_text(&mut surface, &text, 0.0, baseline, None)?;

    let width = metrics.width.ceil().max(1.0);
    let height = (baseline * 1.5).ceil();
    println!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><path d="{}"/></svg>"#,
        surface.svg_path()
    );
    Ok(())
}

/// `--convert <font file> <family> [weight] [slant]`: prints face JSON
fn convert(args: &[String]) -> Result<()> {
    let [path, family, rest @ ..] = args else {
        bail!("usage: canvas_text --convert <font file> <family> [weight] [slant]");
    };
    let weight = rest.first().map(String::as_str).unwrap_or("normal");
    let slant = rest.get(1).map(String::as_str).unwrap_or("normal");
    let key = FaceKey::new(
        family,
        FontWeight::from_keyword(weight),
        FontSlant::from_keyword(slant),
    );

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
    let data = face_data_from_font(bytes, &key, ASCII_CHARSET)?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
