//! Collision detection between the car and falling obstacles
//!
//! Only one vertical edge and a horizontal span are compared per entity:
//! the player's top edge against each obstacle's bottom edge.

use super::state::{Obstacle, Player};

/// The edge and span used for overlap testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    /// Top edge for the player, bottom edge for an obstacle
    pub y: f32,
    pub x_min: f32,
    pub x_max: f32,
}

/// Strictly inside the open interval (min, max)
#[inline]
fn strictly_between(value: f32, min: f32, max: f32) -> bool {
    value > min && value < max
}

/// Obstacle bottom has passed the player's top edge and one end of the
/// player's span lies strictly inside the obstacle's span.
///
/// An obstacle narrower than the car and fully inside its span does not
/// register, and touching edges do not count.
pub fn boxes_collide(player: &CollisionBox, obstacle: &CollisionBox) -> bool {
    obstacle.y > player.y
        && (strictly_between(player.x_max, obstacle.x_min, obstacle.x_max)
            || strictly_between(player.x_min, obstacle.x_min, obstacle.x_max))
}

/// Index of the first obstacle (in pool order) hitting the player
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let pb = player.collision_box();
    obstacles
        .iter()
        .position(|obstacle| boxes_collide(&pb, &obstacle.collision_box()))
}

/// Whether any obstacle hits the player
pub fn has_collided(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_collision(player, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Field;
    use glam::Vec2;
    use proptest::prelude::*;

    fn player_at(x: f32) -> Player {
        let mut player = Player::new(Field::new(800.0, 600.0), Vec2::new(100.0, 60.0), 20.0);
        player.pos.x = x;
        player
    }

    fn obstacle(id: u32, x: f32, width: f32, y: f32) -> Obstacle {
        let mut o = Obstacle::new(id, x, width, 20.0, 0.0);
        o.pos.y = y;
        o
    }

    #[test]
    fn test_wide_obstacle_hits_once_past_top_edge() {
        // Player spans 350..450 with its top edge at y=520
        let player = player_at(350.0);
        let mut o = obstacle(1, 300.0, 200.0, 0.0);
        assert!(!has_collided(&player, std::slice::from_ref(&o)));

        // Bottom edge exactly on the top edge is not past it
        o.pos.y = 500.0;
        assert!(!has_collided(&player, std::slice::from_ref(&o)));

        o.pos.y = 501.0;
        assert!(has_collided(&player, std::slice::from_ref(&o)));
    }

    #[test]
    fn test_far_left_obstacle_never_hits() {
        let player = player_at(350.0);
        for y in (0..600).step_by(7) {
            let o = obstacle(1, 0.0, 50.0, y as f32);
            assert!(!has_collided(&player, &[o]), "y = {}", y);
        }
    }

    #[test]
    fn test_partial_overlap_either_side() {
        let player = player_at(350.0);
        // Player's right end inside obstacle
        assert!(has_collided(&player, &[obstacle(1, 420.0, 100.0, 510.0)]));
        // Player's left end inside obstacle
        assert!(has_collided(&player, &[obstacle(1, 300.0, 100.0, 510.0)]));
    }

    #[test]
    fn test_touching_edges_do_not_hit() {
        let player = player_at(350.0);
        assert!(!has_collided(&player, &[obstacle(1, 450.0, 100.0, 510.0)]));
        assert!(!has_collided(&player, &[obstacle(1, 250.0, 100.0, 510.0)]));
    }

    #[test]
    fn test_narrow_obstacle_inside_span_is_missed() {
        let player = player_at(350.0);
        assert!(!has_collided(&player, &[obstacle(1, 380.0, 40.0, 510.0)]));
    }

    #[test]
    fn test_first_collision_short_circuits_in_pool_order() {
        let player = player_at(350.0);
        let pool = [
            obstacle(1, 0.0, 50.0, 510.0),
            obstacle(2, 300.0, 200.0, 510.0),
            obstacle(3, 420.0, 100.0, 510.0),
        ];
        assert_eq!(first_collision(&player, &pool), Some(1));
        assert_eq!(first_collision(&player, &[]), None);
    }

    proptest! {
        #[test]
        fn prop_no_hit_above_top_edge(
            px in 0.0f32..700.0,
            ox in -100.0f32..800.0,
            ow in 0.0f32..400.0,
            oy in -20.0f32..500.0,
        ) {
            // Obstacle bottom (oy + 20) never passes the top edge at 520
            let player = player_at(px);
            prop_assert!(!has_collided(&player, &[obstacle(1, ox, ow, oy)]));
        }

        #[test]
        fn prop_below_top_edge_matches_overlap_rule(
            px in 0.0f32..700.0,
            ox in -100.0f32..800.0,
            ow in 0.0f32..400.0,
        ) {
            let player = player_at(px);
            let (p_min, p_max) = (px, px + 100.0);
            let (o_min, o_max) = (ox, ox + ow);
            let expected = (p_max > o_min && p_max < o_max) || (p_min > o_min && p_min < o_max);
            prop_assert_eq!(has_collided(&player, &[obstacle(1, ox, ow, 560.0)]), expected);
        }

        #[test]
        fn prop_disjoint_spans_never_hit(
            px in 0u16..700,
            gap in 0u16..100,
            ow in 0u16..300,
            oy in 0u16..600,
        ) {
            // Whole pixels keep the span arithmetic exact
            let (px, gap, ow, oy) = (px as f32, gap as f32, ow as f32, oy as f32);
            let player = player_at(px);
            let right = obstacle(1, px + 100.0 + gap, ow, oy);
            let left = obstacle(2, px - gap - ow, ow, oy);
            prop_assert!(!has_collided(&player, &[right, left]));
        }
    }
}
