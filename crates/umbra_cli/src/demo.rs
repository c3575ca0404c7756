//! Built-in scenes rendered when no `--scene` is given.

use umbra_core::colors;
use umbra_core::description::{
    LightDescription, MaterialDescription, ObjectDescription, SceneDescription, TorusDescription,
};
use umbra_core::{Color, Material};
use umbra_renderer::{Algorithm, Vec3};

fn material(diffuse: Color, shininess: f32) -> MaterialDescription {
    MaterialDescription {
        diffuse,
        shininess,
        specular: Material::default().specular,
        texture: None,
    }
}

fn sphere(center: Vec3, radius: f32, diffuse: Color, shininess: f32) -> ObjectDescription {
    ObjectDescription::Sphere {
        center,
        radius,
        material: material(diffuse, shininess),
    }
}

fn spheres() -> Vec<ObjectDescription> {
    vec![
        sphere(Vec3::new(0.0, 0.0, -40.0), 7.0, Color::new(0.0, 0.0, 1.0), 500.0),
        sphere(Vec3::new(0.0, 3.0, -29.0), 5.0, colors::RED, 600.0),
        sphere(Vec3::new(-6.0, 2.0, -23.0), 4.0, Color::new(0.0, 0.5, 0.0), 400.0),
        sphere(Vec3::new(8.0, 3.0, -7.0), 5.0, Color::new(0.5, 0.0, 0.5), 600.0),
    ]
}

fn floor() -> ObjectDescription {
    ObjectDescription::Plane {
        position: Vec3::new(0.0, -5.0, 0.0),
        normal: Vec3::Y,
        width: 200.0,
        height: 200.0,
        textured: false,
        material: material(colors::DARK_OLIVE_GREEN, 100.0),
    }
}

/// Spheres on a floor under a point light and a spot light.
pub fn trace_scene() -> SceneDescription {
    let mut objects = spheres();
    objects.push(floor());

    SceneDescription {
        name: "spheres".to_string(),
        objects,
        lights: vec![
            LightDescription::Point {
                position: Vec3::new(0.0, 0.0, 5.0),
                intensity: 500.0,
            },
            LightDescription::Cone {
                position: Vec3::new(0.0, 20.0, -25.0),
                direction: Vec3::NEG_Y,
                intensity: 1000.0,
                cutoff_degrees: 40.0,
                falloff_exponent: 44.0,
            },
        ],
        ..SceneDescription::default()
    }
}

/// The sphere scene lit by two luminaires.
pub fn path_scene() -> SceneDescription {
    let mut scene = trace_scene();
    scene.name = "luminaires".to_string();
    for x in [-10.0, 10.0] {
        scene.objects.push(ObjectDescription::Luminaire {
            center: Vec3::new(x, 5.0, -25.0),
            intensity: 10.0,
            radius: umbra_core::sphere::LUMINAIRE_RADIUS,
        });
    }
    scene
}

/// An infinite lattice of twisted tori.
pub fn march_scene() -> SceneDescription {
    SceneDescription {
        name: "twisted lattice".to_string(),
        objects: vec![ObjectDescription::TwistedRepeatedTorus(TorusDescription {
            position: Vec3::new(-4.0, -1.5, -25.0),
            major_radius: 4.0,
            minor_radius: 2.0,
            twist: 0.2,
            material: material(colors::AQUAMARINE, 500.0),
            ..TorusDescription::default()
        })],
        lights: vec![LightDescription::Point {
            position: Vec3::new(0.0, 0.0, 5.0),
            intensity: 500.0,
        }],
        ..SceneDescription::default()
    }
}

/// Demo scene suited to `algorithm`.
pub fn scene_for(algorithm: Algorithm) -> SceneDescription {
    match algorithm {
        Algorithm::RayTrace => trace_scene(),
        Algorithm::PathTrace => path_scene(),
        Algorithm::RayMarch => march_scene(),
    }
}
