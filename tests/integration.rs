use std::fs;
use std::path::{Path, PathBuf};

use calabi_yau::RenderError;
use calabi_yau::config::{BatchPlan, FigureOptions, RenderParams};
use calabi_yau::export::{write_obj_file, write_snapshot_file};
use calabi_yau::geom::ParamGrid;
use calabi_yau::render::{
    Scene, annotation_font, draw_to_buffer, render_batch, render_scene_to_dir, render_to_dir,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("calabi-yau-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn png_dimensions(path: &Path) -> (u32, u32) {
    let bytes = fs::read(path).expect("read png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "png signature");
    assert_eq!(&bytes[12..16], b"IHDR");
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

#[test]
fn default_render_writes_named_1200px_png() {
    let dir = scratch_dir("default");
    let path = render_to_dir(RenderParams::default(), &FigureOptions::default(), &dir)
        .expect("render");

    assert_eq!(path, dir.join("calabi_yau_elev32_azim45_alpha45.png"));
    assert_eq!(png_dimensions(&path), (1200, 1200));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rendering_overwrites_existing_file() {
    let dir = scratch_dir("overwrite");
    let target = dir.join("calabi_yau_elev10_azim-20_alpha90.png");
    fs::write(&target, b"stale").unwrap();

    let figure = FigureOptions {
        size_inches: 3.0,
        ..FigureOptions::default()
    };
    let path = render_to_dir(RenderParams::new(10.7, -20.2, 90.0), &figure, &dir).expect("render");

    assert_eq!(path, target);
    assert_eq!(png_dimensions(&path), (300, 300));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_output_directory_is_an_error() {
    let dir = std::env::temp_dir().join(format!("calabi-yau-{}-absent", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let err = render_to_dir(RenderParams::default(), &FigureOptions::default(), &dir)
        .expect_err("directory does not exist");
    assert!(matches!(err, RenderError::MissingOutputDir(ref p) if *p == dir));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn non_finite_angle_writes_nothing() {
    let dir = scratch_dir("nan");
    let params = RenderParams::new(f64::NAN, 45.0, 45.0);
    let err = render_to_dir(params, &FigureOptions::default(), &dir).expect_err("nan elevation");
    assert!(matches!(err, RenderError::NonFiniteAngle { name: "elevation", .. }));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn default_render_strokes_faint_white_lines() {
    let scene = Scene::build(RenderParams::default()).expect("scene");
    let figure = FigureOptions {
        annotate: false,
        ..FigureOptions::default()
    };
    let pixels = draw_to_buffer(&scene, &figure).expect("draw");
    assert_eq!(pixels.len(), 1200 * 1200 * 3);

    // white over black at 15 % stays grey; one stroke tops out near 38
    let mut histogram = [0usize; 256];
    for px in pixels.chunks_exact(3) {
        assert!(px[0] == px[1] && px[1] == px[2], "not grey: {px:?}");
        histogram[usize::from(px[0])] += 1;
    }
    let faint: usize = histogram[1..=45].iter().sum();
    assert!(faint > 10_000, "only {faint} faint pixels");
    assert!(histogram[30..=45].iter().sum::<usize>() > 1_000);
}

#[test]
fn parameter_text_is_cyan_when_a_font_is_available() {
    let scene = Scene::build_on(&ParamGrid::new(5, 5), RenderParams::default()).expect("scene");
    let figure = FigureOptions {
        size_inches: 6.0,
        ..FigureOptions::default()
    };
    let pixels = draw_to_buffer(&scene, &figure).expect("draw");

    let cyan = pixels
        .chunks_exact(3)
        .filter(|px| px[0] < px[1] && px[1] == px[2])
        .count();
    assert_eq!(cyan > 0, annotation_font().is_some(), "cyan pixels: {cyan}");
}

#[test]
fn exports_accompany_a_single_render() {
    let dir = scratch_dir("exports");
    let scene = Scene::build(RenderParams::new(32.0, 45.0, 0.0)).expect("scene");
    let figure = FigureOptions {
        size_inches: 2.0,
        ..FigureOptions::default()
    };

    render_scene_to_dir(&scene, &figure, &dir).expect("render");
    write_obj_file(&dir.join("wire.obj"), &scene.sheets).expect("obj");
    write_snapshot_file(&dir.join("wire.snap"), &scene).expect("snapshot");

    let obj = fs::read_to_string(dir.join("wire.obj")).unwrap();
    assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 25 * 625);
    assert_eq!(obj.lines().filter(|l| l.starts_with("l ")).count(), 25 * 50);

    let snap = fs::read_to_string(dir.join("wire.snap")).unwrap();
    assert!(snap.starts_with("# calabi-yau snapshot v1\nparams elev=32 azim=45 alpha=0\n"));
    assert!(snap.contains("\ngrid 25 25\n"));
    assert!(snap.contains("\ndiag.non_finite 0\n"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn export_to_missing_directory_reports_path() {
    let scene = Scene::build(RenderParams::default()).expect("scene");
    let path = std::env::temp_dir()
        .join(format!("calabi-yau-{}-nowhere", std::process::id()))
        .join("wire.obj");

    let err = write_obj_file(&path, &scene.sheets).expect_err("parent missing");
    assert!(matches!(err, RenderError::Io { .. }));
    assert!(err.to_string().contains("wire.obj"));
}

#[test]
fn batch_renders_each_combination_once() {
    let dir = scratch_dir("batch");
    let plan = BatchPlan {
        elevation: 32.0,
        azimuths: vec![0, 180],
        alphas: vec![0, 90],
    };
    let figure = FigureOptions {
        size_inches: 1.0,
        ..FigureOptions::default()
    };

    let written = render_batch(&plan, &figure, &dir).expect("batch");
    assert_eq!(written.len(), 4);
    for name in [
        "calabi_yau_elev32_azim0_alpha0.png",
        "calabi_yau_elev32_azim0_alpha90.png",
        "calabi_yau_elev32_azim180_alpha0.png",
        "calabi_yau_elev32_azim180_alpha90.png",
    ] {
        assert!(dir.join(name).is_file(), "{name} missing");
    }
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn repeated_scenes_are_bit_identical() {
    let a = Scene::build(RenderParams::default()).unwrap();
    let b = Scene::build(RenderParams::default()).unwrap();
    assert_eq!(a.cube, b.cube);
    for (sa, sb) in a.sheets.iter().zip(&b.sheets) {
        assert_eq!(sa.index, sb.index);
        let bits = |s: &calabi_yau::geom::MeshSheet| {
            s.points()
                .iter()
                .flat_map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(sa), bits(sb));
    }
}
