use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_robo-face"))
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("face.png");
    let _ = std::fs::remove_file(&out_path);

    let status = Command::new(exe())
        .args(["frame", "--time", "3.1", "--pointer", "56.5,231", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (600, 300));
}

#[test]
fn cli_frame_reads_partial_config() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("small.json");
    let out_path = dir.join("small.png");
    std::fs::write(
        &cfg_path,
        r#"{ "canvas": { "width": 300, "height": 150 }, "controls": { "enabled": false } }"#,
    )
    .unwrap();

    let status = Command::new(exe())
        .arg("frame")
        .arg("--config")
        .arg(&cfg_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (300, 150));
}

#[test]
fn cli_dump_config_round_trips() {
    let output = Command::new(exe()).arg("dump-config").output().unwrap();
    assert!(output.status.success());
    let cfg: robo_face::FaceConfig = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg.knots, robo_face::DEFAULT_KNOTS);

    let output = Command::new(exe()).arg("dump-schedule").output().unwrap();
    assert!(output.status.success());
    let schedule: robo_face::AnimationSchedule = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schedule.loop_period_secs, 10.0);
}

#[test]
fn cli_rejects_invalid_config() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("bad.json");
    std::fs::write(&cfg_path, r#"{ "eye_frame": { "arc_span": -1.0 } }"#).unwrap();

    let status = Command::new(exe())
        .arg("frame")
        .arg("--config")
        .arg(&cfg_path)
        .arg("--out")
        .arg(dir.join("bad.png"))
        .status()
        .unwrap();
    assert!(!status.success());
}
