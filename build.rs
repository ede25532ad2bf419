use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

fn main() {
    let out_root = profile_dir();
    clear_build_log(&out_root);

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let faces_src = Path::new(&manifest_dir).join("resource").join("faces");
    println!("cargo:rerun-if-changed={}", faces_src.display());

    if !faces_src.is_dir() {
        build_log(
            &out_root,
            format_args!("[FACES] no bundled faces at {}", faces_src.display()),
        );
        return;
    }

    let faces_dst = out_root.join("resource").join("faces");
    match sync_faces(&faces_src, &faces_dst, &out_root) {
        Ok(copied) => build_log(
            &out_root,
            format_args!("[FACES] {copied} face file(s) synced -> {}", faces_dst.display()),
        ),
        Err(e) => build_log(&out_root, format_args!("[FACES] sync failed: {e}")),
    }
}

/// target/{profile}
fn profile_dir() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".into());
    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(&manifest_dir).join("target"));
    target_dir.join(profile)
}

/// face ファイル (.json / .js) のうち、コピー先より新しいものだけをコピーする
fn sync_faces(src: &Path, dst: &Path, out_root: &Path) -> io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let src_path = entry?.path();
        let is_face = src_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "json" || e == "js");
        if !src_path.is_file() || !is_face {
            continue;
        }
        let Some(name) = src_path.file_name() else {
            continue;
        };
        println!("cargo:rerun-if-changed={}", src_path.display());
        let dst_path = dst.join(name);

        let stale = match (src_path.metadata(), dst_path.metadata()) {
            (Ok(s), Ok(d)) => match (s.modified(), d.modified()) {
                (Ok(sm), Ok(dm)) => sm > dm,
                _ => true,
            },
            _ => true,
        };
        if stale {
            fs::create_dir_all(dst)?;
            fs::copy(&src_path, &dst_path)?;
            build_log(
                out_root,
                format_args!("[FACES] copied {}", src_path.display()),
            );
            copied += 1;
        }
    }
    Ok(copied)
}

/// target/{profile}/build.log に追記する
fn build_log(out_root: &Path, args: std::fmt::Arguments) {
    use std::io::Write;
    if let Err(e) = fs::create_dir_all(out_root) {
        println!("cargo:warning=failed creating log dir: {e}");
        return;
    }
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let log_path = out_root.join("build.log");
    match fs::OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(mut f) => {
            if let Err(e) = writeln!(f, "[{secs}] {args}") {
                println!("cargo:warning=failed writing build log: {e}");
            }
        }
        Err(e) => println!("cargo:warning=failed opening build log: {e}"),
    }
}

fn clear_build_log(out_root: &Path) {
    let log_path = out_root.join("build.log");
    if log_path.exists()
        && let Err(e) = fs::remove_file(&log_path)
    {
        println!("cargo:warning=failed removing old build log: {e}");
    }
}
