use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sfm_obstacles::population::spawn_population;
use sfm_obstacles::{Point, RejectionSampler, Simulation, SimulatorConfig};

/// Pixels per meter
const SCALE: f32 = 25.0;

struct SimulationModel {
    crowd_simulation: Simulation<RejectionSampler>,
    rng: StdRng,
    half_length: f32,
}

/// Setup the model
fn create_crowd_model(_app: &App) -> SimulationModel {
    let config = match std::env::args().nth(1) {
        Some(path) => SimulatorConfig::from_yaml_file(path).unwrap(),
        None => SimulatorConfig::default(),
    };
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let agents = spawn_population(&config, &mut rng).unwrap();

    SimulationModel {
        crowd_simulation: Simulation::new(
            agents,
            config.model,
            RejectionSampler::new(config.domain_half_length(), config.max_goal_attempts),
        ),
        rng,
        half_length: config.domain_half_length() as f32,
    }
}

fn main() {
    nannou::app(create_crowd_model)
        .update(update) // rather than `.event(event)`, now we only subscribe to updates
        .simple_window(view)
        .size(500, 500)
        .run();
}

fn update(_app: &App, model: &mut SimulationModel, update: Update) {
    let dt = update.since_last.as_secs_f64();
    model.crowd_simulation.step(dt, &mut model.rng);
}

fn to_screen(p: &Point) -> Point2 {
    pt2(p.x as f32 * SCALE, p.y as f32 * SCALE)
}

fn view(app: &App, model: &SimulationModel, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background to blue.
    draw.background().color(CORNFLOWERBLUE);

    let side = 2.0 * model.half_length * SCALE;
    draw.rect()
        .x_y(0.0, 0.0)
        .w_h(side, side)
        .no_fill()
        .stroke(WHITE)
        .stroke_weight(1.0);

    for agent in &model.crowd_simulation.agents {
        let position = to_screen(&agent.position);
        let heading = agent.heading() as f32;
        let nose = position + vec2(heading.cos(), heading.sin()) * 12.0;
        let color = if agent.dodging_right { PLUM } else { ORANGE };

        draw.ellipse()
            .color(color)
            .xy(position)
            .w_h(12.0, 12.0);
        draw.line()
            .start(position)
            .end(nose)
            .weight(2.0)
            .color(BLACK);
        draw.rect()
            .color(color)
            .xy(to_screen(&agent.goal))
            .w_h(4.0, 4.0);
    }
    draw.to_frame(app, &frame).unwrap();
}
