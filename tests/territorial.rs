mod common;

use biogrid_lib::model::config::TerritorialConfig;
use biogrid_lib::model::grid::GridPos;
use biogrid_lib::model::rules::TerritorialRules;
use biogrid_lib::model::state::{Cell, Organism, Species};
use common::{organism, GridBuilder};

fn rules() -> TerritorialRules {
    TerritorialRules::new(TerritorialConfig::default())
}

fn no_births() -> TerritorialRules {
    TerritorialRules::new(TerritorialConfig {
        reproduction_energy: f64::MAX,
        ..TerritorialConfig::default()
    })
}

#[test]
fn test_predator_eats_lone_prey_neighbour() {
    let mut world = GridBuilder::<Cell<Organism>>::empty(3, 3)
        .with_seed(1)
        .with_agent(1, 1, organism(Species::Predator, 100.0, 0))
        .with_agent(1, 2, organism(Species::Prey, 100.0, 0))
        .build(rules());

    let report = world.step();

    assert_energy_at!(world, 1, 1, 169.0);
    assert_cell_empty!(world, 1, 2);
    assert_living!(world, 1);
    assert_eq!(world.grid().at((1, 1).into()).agent().unwrap().age, 1);
    assert_eq!(report.consumed, 1);
}

#[test]
fn test_lone_prey_grazes_until_old_age() {
    let mut world = GridBuilder::<Cell<Organism>>::empty(1, 1)
        .with_agent(0, 0, organism(Species::Prey, 100.0, 0))
        .build(no_births());

    world.step_many(50);
    assert_energy_at!(world, 0, 0, 150.0);

    let report = world.step();
    assert_cell_empty!(world, 0, 0);
    assert_eq!(report.deaths, 1);
}

#[test]
fn test_predator_starves_without_prey() {
    let mut world = GridBuilder::<Cell<Organism>>::empty(1, 1)
        .with_agent(0, 0, organism(Species::Predator, 3.0, 0))
        .build(rules());

    world.step_many(2);
    assert_energy_at!(world, 0, 0, 1.0);
    world.step();
    assert_cell_empty!(world, 0, 0);
}

#[test]
fn test_wandering_predators_are_conserved() {
    let mut builder = GridBuilder::<Cell<Organism>>::empty(8, 8).with_seed(17);
    for i in 0..8 {
        builder = builder.with_agent(i, (i * 3) % 8, organism(Species::Predator, 100.0, 0));
    }
    let mut world = builder.build(no_births());

    let mut moved = 0;
    for _ in 0..20 {
        let report = world.step();
        moved += report.moves;
        assert_living!(world, 8);
    }
    assert!(moved > 0, "predators never moved");
}

#[test]
fn test_threatened_prey_flees_while_neighbour_is_eaten() {
    let mut world = GridBuilder::<Cell<Organism>>::empty(2, 3)
        .with_seed(4)
        .with_agent(0, 0, organism(Species::Prey, 100.0, 0))
        .with_agent(0, 1, organism(Species::Prey, 100.0, 0))
        .with_agent(1, 0, organism(Species::Predator, 100.0, 0))
        .build(no_births());

    world.step();

    // The predator takes the first prey in scan order; the other one
    // escapes to a free orthogonal cell without grazing.
    assert_energy_at!(world, 1, 0, 169.0);
    assert_cell_empty!(world, 0, 0);
    assert_cell_empty!(world, 0, 1);
    let escaped = [(0, 2), (1, 1)]
        .into_iter()
        .find(|&(r, c)| world.grid().at((r, c).into()).holds(Species::Prey))
        .expect("prey should have fled");
    assert_energy_at!(world, escaped.0, escaped.1, 99.0);
    assert_living!(world, 2);
}

#[test]
fn test_contested_move_goes_to_lower_index() {
    let mut world = GridBuilder::<Cell<Organism>>::empty(1, 3)
        .with_seed(4)
        .with_agent(0, 0, organism(Species::Predator, 100.0, 0))
        .with_agent(0, 2, organism(Species::Predator, 100.0, 0))
        .build(no_births());

    let report = world.step();

    assert_cell_empty!(world, 0, 0);
    assert!(world.grid().at((0, 1).into()).holds(Species::Predator));
    assert!(world.grid().at((0, 2).into()).holds(Species::Predator));
    assert_eq!(report.moves, 1);
    assert_eq!(report.blocked_moves, 1);
}

#[test]
fn test_reproduction_halves_parent_once() {
    let mut parent = organism(Species::Prey, 200.0, 20);
    parent.genome.reproduction_rate = 1.0;
    let mut world = GridBuilder::<Cell<Organism>>::empty(3, 3)
        .with_seed(8)
        .with_agent(1, 1, parent)
        .build(rules());

    let report = world.step();

    // 200 - 1 + 2 = 201, halved once.
    assert_energy_at!(world, 1, 1, 100.5);
    assert_eq!(report.births + report.discarded_offspring, 1);
    assert_living!(world, 1 + report.births);
    if report.births == 1 {
        let child = world
            .grid()
            .iter()
            .filter(|(pos, _)| *pos != GridPos::new(1, 1))
            .find_map(|(_, c)| c.agent())
            .unwrap();
        assert_eq!(child.energy, 100.0);
        assert_eq!(child.age, 0);
        assert_eq!(child.kind, Species::Prey);
    }
}

#[test]
fn test_young_parent_does_not_reproduce() {
    let mut parent = organism(Species::Prey, 500.0, 5);
    parent.genome.reproduction_rate = 1.0;
    let mut world = GridBuilder::<Cell<Organism>>::empty(3, 3)
        .with_agent(1, 1, parent)
        .build(rules());

    let report = world.step();
    assert_energy_at!(world, 1, 1, 501.0);
    assert_eq!(report.births + report.discarded_offspring, 0);
}
