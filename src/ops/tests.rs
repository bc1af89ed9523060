// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::fixtures::{call_chain_graph, stuck_graph, tid, two_calls_graph};
use crate::model::{EdgeWeight, TermId, VisibleEdge, VisibleGraph};
use crate::query::GraphIndex;

use super::{apply_action, plan_actions, ActionKind, ActionTargets, NavError, StepIntoTarget};

struct Scene {
    index: GraphIndex,
    visible: VisibleGraph,
}

impl Scene {
    fn new(index: GraphIndex) -> Self {
        let visible = VisibleGraph::new(&index);
        Self { index, visible }
    }

    fn edge(&self, from: &str, to: &str) -> VisibleEdge {
        VisibleEdge::between(&self.index, tid(from), tid(to))
    }

    fn reveal(&mut self, node: &str, from: &str, to: &str) {
        let replacing = self.edge(from, to);
        self.visible.insert_node(&self.index, &tid(node), &replacing).expect("reveal");
    }

    fn plan(&self, selected: &str) -> ActionTargets {
        plan_actions(&self.index, &self.visible, &tid(selected))
    }
}

fn destination(targets: &ActionTargets, kind: ActionKind) -> Option<&str> {
    targets.destination(kind).map(TermId::as_str)
}

#[fixture]
fn call_chain() -> Scene {
    Scene::new(GraphIndex::new(call_chain_graph()))
}

#[rstest]
fn root_of_a_fresh_session(call_chain: Scene) {
    let targets = call_chain.plan("r");

    assert_eq!(destination(&targets, ActionKind::StepForward), Some("a"));
    assert_eq!(destination(&targets, ActionKind::JumpForward), Some("a"));
    assert_eq!(destination(&targets, ActionKind::StepOver), Some("c"));
    assert_eq!(destination(&targets, ActionKind::StepBackward), None);
    assert_eq!(destination(&targets, ActionKind::JumpBackward), None);
    assert_eq!(destination(&targets, ActionKind::StepInto), None);

    let forward = targets.step_forward.as_ref().expect("step forward");
    assert_eq!(forward.replacing, call_chain.edge("r", "d"));
    assert_eq!(forward.replacing.weight, EdgeWeight::Multi);
}

#[rstest]
fn terminal_of_a_fresh_session(call_chain: Scene) {
    let targets = call_chain.plan("d");

    assert_eq!(destination(&targets, ActionKind::StepBackward), Some("c"));
    assert_eq!(destination(&targets, ActionKind::JumpBackward), Some("a"));
    assert_eq!(destination(&targets, ActionKind::StepForward), None);
    assert_eq!(destination(&targets, ActionKind::JumpForward), None);
    assert_eq!(destination(&targets, ActionKind::StepOver), None);
}

#[rstest]
fn step_forward_then_inner_actions(mut call_chain: Scene) {
    let targets = call_chain.plan("r");
    let diff =
        apply_action(&call_chain.index, &mut call_chain.visible, &targets, ActionKind::StepForward)
            .expect("step forward");
    assert_eq!(diff.nodes_added, vec![tid("a")]);
    let weight = |node: &str| call_chain.visible.sole_outgoing(&tid(node)).map(|e| e.weight);
    assert_eq!(weight("r"), Some(EdgeWeight::Single));
    assert_eq!(weight("a"), Some(EdgeWeight::Multi));

    let targets = call_chain.plan("a");
    assert_eq!(destination(&targets, ActionKind::StepForward), Some("b"));
    assert_eq!(destination(&targets, ActionKind::JumpForward), Some("c"));
    assert_eq!(destination(&targets, ActionKind::StepOver), Some("c"));
    assert_eq!(
        targets.step_into,
        Some(StepIntoTarget { subterm: tid("l1"), value: tid("l3") })
    );
    assert_eq!(destination(&targets, ActionKind::StepBackward), None);
    assert_eq!(destination(&targets, ActionKind::JumpBackward), None);
}

#[rstest]
fn jump_forward_takes_a_leading_return(mut call_chain: Scene) {
    call_chain.reveal("b", "r", "d");
    let targets = call_chain.plan("b");
    assert_eq!(destination(&targets, ActionKind::JumpForward), Some("c"));
}

#[rstest]
fn jump_forward_aborts_at_a_visible_node(mut call_chain: Scene) {
    call_chain.reveal("b", "r", "d");
    let targets = call_chain.plan("r");
    assert_eq!(destination(&targets, ActionKind::JumpForward), None);
    assert_eq!(destination(&targets, ActionKind::StepForward), Some("a"));
}

#[rstest]
fn jump_backward_aborts_at_a_visible_node(mut call_chain: Scene) {
    call_chain.reveal("b", "r", "d");
    let targets = call_chain.plan("d");
    assert_eq!(destination(&targets, ActionKind::JumpBackward), None);
    assert_eq!(destination(&targets, ActionKind::StepBackward), None);
}

#[rstest]
fn step_over_is_disarmed_when_its_landing_node_is_visible(mut call_chain: Scene) {
    call_chain.reveal("c", "r", "d");
    let targets = call_chain.plan("r");
    assert_eq!(destination(&targets, ActionKind::StepOver), None);
    assert_eq!(destination(&targets, ActionKind::JumpForward), Some("a"));
}

#[rstest]
fn step_into_is_disarmed_once_its_pair_is_visible(mut call_chain: Scene) {
    call_chain.reveal("a", "r", "d");
    let targets = call_chain.plan("a");
    apply_action(&call_chain.index, &mut call_chain.visible, &targets, ActionKind::StepInto)
        .expect("step into");

    assert!(call_chain.visible.contains(&tid("l1")));
    assert!(call_chain.visible.contains_edge(&call_chain.edge("r", "a")));
    assert_eq!(call_chain.plan("a").step_into, None);
}

#[rstest]
fn pair_chain_supports_stepping(mut call_chain: Scene) {
    call_chain.reveal("a", "r", "d");
    let targets = call_chain.plan("a");
    apply_action(&call_chain.index, &mut call_chain.visible, &targets, ActionKind::StepInto)
        .expect("step into");

    let targets = call_chain.plan("l1");
    assert_eq!(destination(&targets, ActionKind::StepForward), Some("l2"));
    let targets = call_chain.plan("l3");
    assert_eq!(destination(&targets, ActionKind::StepBackward), None);
    assert_eq!(destination(&targets, ActionKind::JumpBackward), None);
}

#[rstest]
fn selecting_a_hidden_node_arms_nothing(call_chain: Scene) {
    assert!(call_chain.plan("b").is_empty());
    assert!(call_chain.plan("ghost").is_empty());
}

#[rstest]
fn planning_does_not_mutate_the_visible_graph(call_chain: Scene) {
    let before = call_chain.visible.clone();
    for node in ["r", "d"] {
        let _ = call_chain.plan(node);
    }
    assert_eq!(call_chain.visible, before);
}

#[rstest]
fn armed_destinations_are_hidden(mut call_chain: Scene) {
    call_chain.reveal("a", "r", "d");
    call_chain.reveal("c", "a", "d");
    for node in call_chain.visible.nodes().clone() {
        let targets = plan_actions(&call_chain.index, &call_chain.visible, &node);
        for kind in targets.armed() {
            let destination = targets.destination(kind).expect("armed destination");
            assert!(!call_chain.visible.contains(destination), "{kind} from {node}");
        }
    }
}

#[rstest]
fn applying_a_disarmed_action_fails_without_change(mut call_chain: Scene) {
    let before = call_chain.visible.clone();
    let targets = call_chain.plan("r");
    let err =
        apply_action(&call_chain.index, &mut call_chain.visible, &targets, ActionKind::StepInto)
            .unwrap_err();
    assert_eq!(err, NavError::NotArmed { kind: ActionKind::StepInto });
    assert_eq!(call_chain.visible, before);
}

#[rstest]
#[case("r", ActionKind::StepForward)]
#[case("r", ActionKind::JumpForward)]
#[case("r", ActionKind::StepOver)]
#[case("d", ActionKind::StepBackward)]
#[case("d", ActionKind::JumpBackward)]
fn every_action_round_trips_through_undo(
    mut call_chain: Scene,
    #[case] selected: &str,
    #[case] kind: ActionKind,
) {
    let before = call_chain.visible.clone();
    let targets = call_chain.plan(selected);
    assert!(targets.is_armed(kind), "{kind} from {selected}");
    apply_action(&call_chain.index, &mut call_chain.visible, &targets, kind).expect("apply");
    assert_ne!(call_chain.visible, before);
    call_chain.visible.undo().expect("undo");
    assert_eq!(call_chain.visible.nodes(), before.nodes());
    assert_eq!(call_chain.visible.edges(), before.edges());
}

#[test]
fn first_calling_subterm_wins_for_step_into_and_over() {
    let scene = Scene::new(GraphIndex::new(two_calls_graph()));
    let targets = scene.plan("r");

    assert_eq!(targets.step_into, Some(StepIntoTarget { subterm: tid("p"), value: tid("p2") }));
    assert_eq!(destination(&targets, ActionKind::StepOver), Some("b"));
    assert_eq!(destination(&targets, ActionKind::JumpForward), Some("b"));
}

#[test]
fn stuck_graph_offers_nothing_from_the_root() {
    let scene = Scene::new(GraphIndex::new(stuck_graph()));
    let targets = scene.plan("r");
    assert!(targets.is_empty());
    assert_eq!(
        scene.visible.sole_outgoing(&tid("r")).map(|edge| edge.weight),
        Some(EdgeWeight::Single)
    );
}
