use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static");
    let embedded_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
        .unwrap();
    }
    // The embedded asset directory must exist even when the front end has
    // not been built, so API-only builds and tests still compile.
    fs::create_dir_all(embedded_dir).unwrap();

    println!("cargo:rerun-if-changed=../frontend/dist");
}
