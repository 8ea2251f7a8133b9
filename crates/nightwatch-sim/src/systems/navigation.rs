//! Navigator integration: moves guards toward their destinations.

use hecs::World;

use nightwatch_core::types::Pose;

use crate::components::Guard;
use crate::navigator::StraightLineNavigator;

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (_guard, pose, nav)) in
        world.query_mut::<(&Guard, &mut Pose, &mut StraightLineNavigator)>()
    {
        nav.advance(pose, dt);
    }
}
