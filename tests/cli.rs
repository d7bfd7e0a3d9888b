use assert_cmd::prelude::*;
use predicates::str::contains;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn write_scene(dir: &TempDir) {
    fs::write(
        dir.path().join("cube.obj"),
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
    )
    .expect("write model");
    let scene = r#"{
  "name": "Demo",
  "actors": [
    {
      "name": "Cube",
      "tag": "prop",
      "components": [
        { "type": "ModelRenderer", "model": "cube.obj" },
        { "type": "RotationComponent", "rotate": [0, 90, 0] }
      ]
    },
    {
      "name": "Mover",
      "transform": { "position": [1, 0, 0] },
      "lifespan": 10
    }
  ]
}
"#;
    fs::write(dir.path().join("scene.json"), scene).expect("write scene");
}

#[test]
fn cli_runs_frames_and_prints_summary() {
    let dir = TempDir::new().expect("temp dir");
    write_scene(&dir);
    let mut cmd = Command::cargo_bin("neu-engine").expect("binary exists");
    cmd.arg(dir.path().join("scene.json"))
        .arg("--frames")
        .arg("3")
        .arg("--assets")
        .arg(dir.path());
    cmd.assert()
        .success()
        .stdout(contains("Loaded scene 'Demo' with 2 actors"))
        .stdout(contains(" - Cube [prop] components=2"))
        .stdout(contains(" - Mover [] components=0"))
        .stdout(contains("Ran 3 frame(s), 3 draw call(s)"))
        .stdout(contains(" - Mover pos=(1.00, 0.00, 0.00)"));
}

#[test]
fn cli_fails_on_missing_scene() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = Command::cargo_bin("neu-engine").expect("binary exists");
    cmd.arg(dir.path().join("missing.json"));
    cmd.assert()
        .failure()
        .stderr(contains("failed to load scene"));
}

#[test]
fn cli_rejects_unknown_flags() {
    let dir = TempDir::new().expect("temp dir");
    write_scene(&dir);
    let mut cmd = Command::cargo_bin("neu-engine").expect("binary exists");
    cmd.arg(dir.path().join("scene.json")).arg("--fullscreen");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --fullscreen"));
}
