use std::fmt;

use crate::{Agent, AgentId, Point, Vec3f};

/// Snapshot of one agent's state for human consumption.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentReport {
    pub agent_id: AgentId,
    pub position: Point,
    pub velocity: Vec3f,
    pub speed: f64,
    pub goal: Point,
    pub last_desired_force: Vec3f,
    pub last_social_force: Vec3f,
}

impl From<&Agent> for AgentReport {
    fn from(agent: &Agent) -> Self {
        AgentReport {
            agent_id: agent.agent_id,
            position: agent.position,
            velocity: agent.velocity,
            speed: agent.speed(),
            goal: agent.goal,
            last_desired_force: agent.last_desired_force,
            last_social_force: agent.last_social_force,
        }
    }
}

struct Row<'a>(&'a Vec3f);

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Display for AgentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id: {}", self.agent_id)?;
        writeln!(f, "pose: {}", Row(&self.position))?;
        writeln!(f, "velocity: {}", Row(&self.velocity))?;
        writeln!(f, "current speed: {}", self.speed)?;
        writeln!(f, "current goal: {}", Row(&self.goal))?;
        writeln!(f, "last desired force: {}", Row(&self.last_desired_force))?;
        write!(f, "last social force: {}", Row(&self.last_social_force))
    }
}

/// Formats every agent of the population under a `===` separator line.
pub fn format_population(agents: &[Agent]) -> String {
    let mut out = String::from("===");
    for agent in agents {
        out.push('\n');
        out.push_str(&AgentReport::from(agent).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let mut agent = Agent::default();
        agent.agent_id = 3;
        agent.position = Point::new(1.0, 2.0, 0.0);
        agent.velocity = Vec3f::new(3.0, 4.0, 0.0);
        agent.goal = Point::new(-1.5, 0.0, 0.0);

        let report = AgentReport::from(&agent);
        assert_eq!(report.speed, 5.0);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id: 3",
                "pose: 1 2 0",
                "velocity: 3 4 0",
                "current speed: 5",
                "current goal: -1.5 0 0",
                "last desired force: 0 0 0",
                "last social force: 0 0 0",
            ]
        );
    }

    #[test]
    fn test_population_dump_has_header_and_every_agent() {
        let mut first = Agent::default();
        first.agent_id = 0;
        let mut second = Agent::default();
        second.agent_id = 1;
        let dump = format_population(&[first, second]);
        assert!(dump.starts_with("===\nid: 0\n"));
        assert!(dump.contains("\nid: 1\n"));
        assert_eq!(dump.lines().count(), 1 + 2 * 7);
    }
}
