//! Shape generation for 2D primitives
//!
//! The whole frame is assembled into one triangle list. Targets are drawn
//! nine times, once per tiling offset, so the wrap seam never shows.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::collision::TILING_OFFSETS;
use crate::sim::state::{GamePhase, InputSet, Paddle, Projectile, Target, World};

/// Triangle-fan vertices for one target blob at a tiling offset.
///
/// The blob is an irregular polygon: each rim vertex sits at the target's
/// per-vertex profile radius.
pub fn target_vertices(target: &Target, offset: Vec2, out: &mut Vec<Vertex>) {
    let center = target.pos + offset;
    let sides = target.profile.len();

    for i in 0..sides {
        let a0 = (i as f32 / sides as f32) * TAU;
        let a1 = (((i + 1) % sides) as f32 / sides as f32) * TAU;
        let r0 = target.profile[i] * target.scale;
        let r1 = target.profile[(i + 1) % sides] * target.scale;

        out.push(Vertex::new(center.x, center.y, target.color));
        out.push(Vertex::new(
            center.x + r0 * a0.cos(),
            center.y + r0 * a0.sin(),
            target.color,
        ));
        out.push(Vertex::new(
            center.x + r1 * a1.cos(),
            center.y + r1 * a1.sin(),
            target.color,
        ));
    }
}

fn quad(center: Vec2, half: Vec2, color: [f32; 4], out: &mut Vec<Vertex>) {
    let (l, r) = (center.x - half.x, center.x + half.x);
    let (b, t) = (center.y - half.y, center.y + half.y);

    out.push(Vertex::new(l, t, color));
    out.push(Vertex::new(r, t, color));
    out.push(Vertex::new(r, b, color));

    out.push(Vertex::new(l, t, color));
    out.push(Vertex::new(l, b, color));
    out.push(Vertex::new(r, b, color));
}

/// Paddle body quad
pub fn paddle_vertices(paddle: &Paddle, out: &mut Vec<Vertex>) {
    let half = Vec2::new(
        PADDLE_HALF_WIDTH * paddle.scale,
        PADDLE_HALF_HEIGHT * paddle.scale,
    );
    quad(paddle.pos, half, paddle.color, out);
}

/// Semi-transparent thruster overlay, a slightly larger quad behind the body
pub fn thruster_vertices(paddle: &Paddle, out: &mut Vec<Vertex>) {
    let half = Vec2::new(
        PADDLE_HALF_WIDTH * paddle.scale * 1.1,
        PADDLE_HALF_HEIGHT * paddle.scale * 2.0,
    );
    quad(paddle.pos, half, colors::THRUSTER, out);
}

/// Small disc for a projectile
pub fn projectile_vertices(projectile: &Projectile, out: &mut Vec<Vertex>) {
    const SEGMENTS: usize = 8;
    let c = projectile.pos;

    for i in 0..SEGMENTS {
        let a0 = (i as f32 / SEGMENTS as f32) * TAU;
        let a1 = ((i + 1) as f32 / SEGMENTS as f32) * TAU;

        out.push(Vertex::new(c.x, c.y, colors::PROJECTILE));
        out.push(Vertex::new(
            c.x + PROJECTILE_RADIUS * a0.cos(),
            c.y + PROJECTILE_RADIUS * a0.sin(),
            colors::PROJECTILE,
        ));
        out.push(Vertex::new(
            c.x + PROJECTILE_RADIUS * a1.cos(),
            c.y + PROJECTILE_RADIUS * a1.sin(),
            colors::PROJECTILE,
        ));
    }
}

/// Assemble the full frame's vertex list.
///
/// Targets and projectiles are always drawn; the paddle (and its thruster
/// overlay, when the blink window is open and Up is held) only while the
/// round is live.
pub fn world_vertices(world: &World, input: &InputSet) -> Vec<Vertex> {
    let mut out = Vec::new();

    for target in &world.targets.targets {
        for offset in TILING_OFFSETS {
            target_vertices(target, offset, &mut out);
        }
    }

    for projectile in &world.projectiles.projectiles {
        projectile_vertices(projectile, &mut out);
    }

    if world.phase == GamePhase::Playing {
        if world.paddle.thruster_visible(input) {
            thruster_vertices(&world.paddle, &mut out);
        }
        paddle_vertices(&world.paddle, &mut out);
    }

    out
}
