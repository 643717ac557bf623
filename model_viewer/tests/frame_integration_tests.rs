//! Integration tests for frame rendering through a backend written
//! against the public device traits.


use std::sync::Arc;
use model_viewer::glam::{Vec2, Vec3, Vec4};
use model_viewer::viewer::asset::{MaterialDef, MeshPart, SourceFaceSet, SourceVertex};
use model_viewer::viewer::camera::Transform;
use model_viewer::viewer::model::{Model, ModelInstance};
use model_viewer::viewer::render::GraphicsDevice;
use model_viewer::viewer::{
    DrawStep, FrameScheduler, RenderContext, SceneRegistry, ViewerConfig, Viewport,
};
use test_device::TestDevice;

fn triangle_part(mtd: &str) -> MeshPart {
    let vertex = |x: f32, y: f32| SourceVertex {
        position: Vec3::new(x, y, 0.0),
        normal: Some(Vec3::Z),
        tangents: vec![Vec4::new(1.0, 0.0, 0.0, 1.0)],
        uvs: vec![Vec2::new(x, y)],
    };
    MeshPart {
        vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)],
        face_sets: vec![SourceFaceSet::triangle_list(vec![0, 1, 2])],
        material: MaterialDef::new(mtd),
    }
}

fn setup() -> (Arc<TestDevice>, RenderContext) {
    let device = TestDevice::shared();
    let context = RenderContext::initialize(
        Arc::clone(&device) as Arc<dyn GraphicsDevice>,
        ViewerConfig::default(),
        Viewport::new(1024.0, 768.0),
    )
    .unwrap();
    (device, context)
}

#[test]
fn test_integration_frame_draws_both_geometry_passes() {
    let (device, mut context) = setup();
    let model = Arc::new(
        Model::from_parts(&context.load_context(), "o1234", &[
            triangle_part("P_Metal.mtd"),
            triangle_part("P_Glass_Alp.mtd"),
        ])
        .unwrap(),
    );
    let scene = SceneRegistry::new();
    scene.add_instance(ModelInstance::new("o1234", model, Transform::default()));

    let mut scheduler = FrameScheduler::new();
    let report = scheduler.run_frame(&mut context, &scene, 1.0 / 30.0).unwrap();

    assert_eq!(report.steps, DrawStep::ALL.to_vec());
    assert!(report.is_clean());
    assert_eq!(device.draws(), 2);
    assert_eq!(device.submitted(), 1);
    assert_eq!(device.take_labels(), vec!["FPS: 30".to_string()]);
}

#[test]
fn test_integration_background_loader_feeds_running_frames() {
    const MODELS: usize = 20;
    let (device, mut context) = setup();
    let scene = Arc::new(SceneRegistry::new());
    let load = context.load_context();

    let loader = scene
        .spawn_loader("map-loader", move |registry| {
            for i in 0..MODELS {
                let model = Model::from_parts(&load, format!("m{}", i), &[triangle_part("P_Stone.mtd")])
                    .map(Arc::new)
                    .unwrap();
                let transform = Transform::from_position(Vec3::new(i as f32, 0.0, 0.0));
                registry.add_instance(ModelInstance::new(format!("m{}", i), model, transform));
            }
        })
        .unwrap();

    let mut scheduler = FrameScheduler::new();
    while !loader.is_finished() {
        let report = scheduler.run_frame(&mut context, &scene, 0.016).unwrap();
        assert_eq!(report.steps, DrawStep::ALL.to_vec());
    }
    loader.join().unwrap();

    let before = device.draws();
    scheduler.run_frame(&mut context, &scene, 0.016).unwrap();
    assert_eq!(device.draws() - before, MODELS);
    assert_eq!(scene.stats().instance_count, MODELS);
}

#[test]
fn test_integration_clear_releases_gpu_buffers() {
    let (device, context) = setup();
    let baseline = device.live_buffers();
    let scene = SceneRegistry::new();
    {
        let model = Arc::new(Model::from_parts(&context.load_context(), "m", &[triangle_part("P_Stone.mtd")]).unwrap());
        scene.add_instance(ModelInstance::new("a", Arc::clone(&model), Transform::default()));
        scene.add_instance(ModelInstance::new("b", model, Transform::default()));
    }
    assert!(device.live_buffers() > baseline);

    scene.clear(context.textures());
    assert_eq!(device.live_buffers(), baseline);
    context.shutdown().unwrap();
}
