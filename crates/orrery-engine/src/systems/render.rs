use crate::components::entity::{Entity, Visual};
use crate::components::mesh::Shape;
use crate::renderer::instance::{
    RenderBuffer, RenderInstance, FLAG_DOUBLE_SIDED, KIND_DASHED_CIRCLE, KIND_MODEL, KIND_RING,
    KIND_SPHERE, NO_EMISSIVE,
};

/// Build the render buffer from a set of entities.
/// Opaque instances first, then transparent ones; `transparent_split`
/// marks the boundary. Inactive and visual-less entities are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut transparent: Vec<RenderInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let visual = match &entity.visual {
            Some(v) => v,
            None => continue,
        };

        let mut instance = RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            rot_x: entity.rotation.x,
            rot_y: entity.rotation.y,
            rot_z: entity.rotation.z,
            scale: entity.scale.x,
            opacity: 1.0,
            emissive: NO_EMISSIVE,
            ..Default::default()
        };

        match visual {
            Visual::Mesh(mesh) => {
                let (kind, a, b, c) = match mesh.shape {
                    Shape::Sphere { radius, segments } => (KIND_SPHERE, radius, segments as f32, 0.0),
                    Shape::Ring { inner, outer, segments } => (KIND_RING, inner, outer, segments as f32),
                    Shape::DashedCircle { radius, dash, gap, .. } => (KIND_DASHED_CIRCLE, radius, dash, gap),
                };
                instance.kind = kind;
                instance.a = a;
                instance.b = b;
                instance.c = c;
                instance.color = mesh.color.to_hex() as f32;
                instance.emissive = mesh.emissive.map_or(NO_EMISSIVE, |e| e.to_hex() as f32);
                instance.opacity = mesh.opacity;
                instance.shininess = mesh.shininess;
                if mesh.double_sided {
                    instance.flags = FLAG_DOUBLE_SIDED as f32;
                }
                if mesh.is_transparent() {
                    transparent.push(instance);
                    continue;
                }
            }
            Visual::Model(model) => {
                instance.kind = KIND_MODEL;
                instance.a = model.handle.0 as f32;
                instance.b = model.bounding_radius;
            }
        }
        buffer.push(instance);
    }

    buffer.set_transparent_split(buffer.instance_count());
    for inst in transparent {
        buffer.push(inst);
    }
}
