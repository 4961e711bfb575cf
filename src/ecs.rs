/*
 * Entity/Component Store Module
 *
 * Entities are grouped by kind. Each simulatable kind owns five columns of Vec3
 * (position, velocity, color, size, angular velocity) that stay index-aligned with its
 * handle list, so row i of every column belongs to handle i. Bulk systems borrow whole
 * columns instead of walking entities one at a time.
 */

use nannou::prelude::*;
use std::collections::HashMap;

/// Ids of different kinds live in separate bands of this width.
pub const TYPE_ID_BAND: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Square,
    Circle,
    Particle,
    // Has a handle but no components
    Marker,
}

impl EntityKind {
    pub fn index(self) -> u32 {
        match self {
            EntityKind::Square => 0,
            EntityKind::Circle => 1,
            EntityKind::Particle => 2,
            EntityKind::Marker => 3,
        }
    }

    pub fn is_simulated(self) -> bool {
        !matches!(self, EntityKind::Marker)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Position,
    Velocity,
    Color,
    Size,
    AngularVelocity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityHandle {
    pub kind: EntityKind,
    pub id: u32,
    pub ttl: u32,
}

/// The five columns of one entity kind.
#[derive(Debug, Clone, Default)]
pub struct ComponentColumns {
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub color: Vec<Vec3>,
    pub size: Vec<Vec3>,
    pub angular_velocity: Vec<Vec3>,
}

impl ComponentColumns {
    pub fn column(&self, component: Component) -> &Vec<Vec3> {
        match component {
            Component::Position => &self.position,
            Component::Velocity => &self.velocity,
            Component::Color => &self.color,
            Component::Size => &self.size,
            Component::AngularVelocity => &self.angular_velocity,
        }
    }

    pub fn column_mut(&mut self, component: Component) -> &mut Vec<Vec3> {
        match component {
            Component::Position => &mut self.position,
            Component::Velocity => &mut self.velocity,
            Component::Color => &mut self.color,
            Component::Size => &mut self.size,
            Component::AngularVelocity => &mut self.angular_velocity,
        }
    }

    fn push_defaults(&mut self, color: Vec3) {
        self.position.push(Vec3::ZERO);
        self.velocity.push(Vec3::ZERO);
        self.color.push(color);
        self.size.push(vec3(1.0, 1.0, 0.0));
        self.angular_velocity.push(vec3(0.0, 0.0, 0.0001));
    }

    // Row count, or None if the columns disagree
    pub fn rows(&self) -> Option<usize> {
        let len = self.position.len();
        let aligned = [&self.velocity, &self.color, &self.size, &self.angular_velocity]
            .iter()
            .all(|column| column.len() == len);
        aligned.then_some(len)
    }
}

#[derive(Debug, Default)]
pub struct EntityStore {
    entities: HashMap<EntityKind, Vec<EntityHandle>>,
    columns: HashMap<EntityKind, ComponentColumns>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_entity(&mut self, kind: EntityKind, color: Vec3) -> EntityHandle {
        let handles = self.entities.entry(kind).or_default();
        let handle = EntityHandle {
            kind,
            id: TYPE_ID_BAND * kind.index() + handles.len() as u32,
            ttl: 0,
        };
        handles.push(handle);

        if kind.is_simulated() {
            self.columns.entry(kind).or_default().push_defaults(color);
        }

        handle
    }

    pub fn create_entities(&mut self, kind: EntityKind, color: Vec3, count: usize) -> Vec<EntityHandle> {
        (0..count).map(|_| self.create_entity(kind, color)).collect()
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.entities.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    pub fn entities(&self, kind: EntityKind) -> &[EntityHandle] {
        self.entities.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<EntityHandle> {
        self.entities.entry(kind).or_default()
    }

    pub fn components(&self, kind: EntityKind, component: Component) -> &[Vec3] {
        self.columns
            .get(&kind)
            .map(|columns| columns.column(component).as_slice())
            .unwrap_or(&[])
    }

    pub fn components_mut(&mut self, kind: EntityKind, component: Component) -> &mut Vec<Vec3> {
        self.columns.entry(kind).or_default().column_mut(component)
    }

    pub fn columns(&self, kind: EntityKind) -> Option<&ComponentColumns> {
        self.columns.get(&kind)
    }

    // Handles and every column of one kind, borrowed together. None for kinds without columns.
    pub fn population_mut(&mut self, kind: EntityKind) -> Option<(&mut [EntityHandle], &mut ComponentColumns)> {
        if !kind.is_simulated() {
            return None;
        }
        let handles = self.entities.entry(kind).or_default();
        let columns = self.columns.entry(kind).or_default();
        Some((handles.as_mut_slice(), columns))
    }
}
