//! # Ordering properties
//!
//! Cross-component properties of the validator and the sorters, exercised
//! on a workshop-sized module set: determinism, mirroring, completeness,
//! topological correctness, stability, and convergence under shuffling.

#[cfg(test)]
mod tests {
    use loadstone_ordering::algorithms::{
        build_dependency_graph, stable_topological_sort, validate_load_order,
    };
    use loadstone_ordering::domain::invariants::{
        invariant_conflicts_mirrored, invariant_no_cycles, invariant_topological_order,
    };
    use loadstone_ordering::{Conflict, ConflictKind, ModEntry, Module, ModuleId};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn ids(raw: &[&str]) -> Vec<ModuleId> {
        raw.iter().map(|id| ModuleId::new(*id)).collect()
    }

    fn units(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|unit| unit.to_string()).collect()
    }

    /// A workshop-sized set: engine modules, a patch library, and community
    /// mods wired through declared and inferred dependencies.
    fn workshop_modules() -> Vec<Module> {
        vec![
            Module::new("Native", "Native")
                .with_official(true)
                .with_owned_units(units(&["TaleWorlds.Core.dll"])),
            Module::new("SandBox", "Sandbox")
                .with_official(true)
                .with_mandatory_dependencies(ids(&["Native"])),
            Module::new("CustomBattle", "Custom Battle")
                .with_official(true)
                .with_mandatory_dependencies(ids(&["Native"])),
            Module::new("Harmony", "Harmony").with_owned_units(units(&["Harmony.dll"])),
            Module::new("Tweaks", "Gameplay Tweaks")
                .with_mandatory_dependencies(ids(&["SandBox"]))
                .with_referenced_units(units(&["Harmony.dll"])),
            Module::new("Overhaul", "Total Overhaul")
                .with_mandatory_dependencies(ids(&["Native"]))
                .with_optional_dependencies(ids(&["Tweaks"])),
            Module::new("UIExtender", "UI Extender")
                .with_referenced_units(units(&["TaleWorlds.Core.dll"])),
            Module::new("MiscFix", "Misc Fixes"),
        ]
    }

    fn entries_from(modules: Vec<Module>) -> Vec<ModEntry> {
        modules
            .into_iter()
            .enumerate()
            .map(|(index, module)| {
                let mut entry = ModEntry::new(module, index);
                entry.selected = true;
                entry
            })
            .collect()
    }

    fn validate(entries: &mut [ModEntry]) {
        let graph = build_dependency_graph(entries);
        validate_load_order(entries, &graph);
    }

    fn sorted(entries: &[ModEntry]) -> Vec<ModEntry> {
        let graph = build_dependency_graph(entries);
        stable_topological_sort(entries, &graph).unwrap()
    }

    fn order(entries: &[ModEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.id().as_str()).collect()
    }

    fn shuffled(mut entries: Vec<ModEntry>, seed: u64) -> Vec<ModEntry> {
        let mut rng = StdRng::seed_from_u64(seed);
        entries.shuffle(&mut rng);
        entries
    }

    // =========================================================================
    // DETERMINISM & MIRRORING
    // =========================================================================

    #[test]
    fn test_validation_is_deterministic_on_shuffled_order() {
        let mut entries = shuffled(entries_from(workshop_modules()), 11);

        validate(&mut entries);
        let first: Vec<Vec<Conflict>> =
            entries.iter().map(|entry| entry.conflicts.clone()).collect();

        validate(&mut entries);
        let second: Vec<Vec<Conflict>> =
            entries.iter().map(|entry| entry.conflicts.clone()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_every_ordering_conflict_is_mirrored() {
        for seed in [3, 17, 23, 41] {
            let mut entries = shuffled(entries_from(workshop_modules()), seed);
            validate(&mut entries);
            assert!(
                invariant_conflicts_mirrored(&entries),
                "unmirrored conflict with seed {seed}"
            );
        }
    }

    #[test]
    fn test_completeness_every_dangling_dependency_reported_once() {
        // Remove the engine module entirely: everything that declared it
        // must report exactly one Missing conflict for it.
        let modules: Vec<Module> = workshop_modules()
            .into_iter()
            .filter(|module| module.id != ModuleId::new("Native"))
            .collect();
        let mut entries = entries_from(modules);
        validate(&mut entries);

        for entry in &entries {
            let declared_native = entry
                .module
                .mandatory_dependency_ids
                .iter()
                .any(|id| id == &ModuleId::new("Native"));
            let missing_native = entry
                .conflicts
                .iter()
                .filter(|conflict| {
                    conflict.kind == ConflictKind::Missing
                        && conflict.counterpart_id == ModuleId::new("Native")
                })
                .count();
            assert_eq!(missing_native, usize::from(declared_native));
        }
    }

    // =========================================================================
    // TOPOLOGICAL CORRECTNESS & STABILITY
    // =========================================================================

    #[test]
    fn test_sorted_order_respects_every_edge() {
        for seed in [1, 5, 9] {
            let entries = shuffled(entries_from(workshop_modules()), seed);
            let output = sorted(&entries);

            let check = build_dependency_graph(&output);
            assert!(invariant_no_cycles(&check));
            assert!(
                invariant_topological_order(&check),
                "edge violated with seed {seed}"
            );
        }
    }

    #[test]
    fn test_sort_converges_to_one_order_from_any_shuffle() {
        let baseline = sorted(&entries_from(workshop_modules()));

        for seed in [2, 7, 13, 19, 31] {
            let entries = shuffled(entries_from(workshop_modules()), seed);
            let output = sorted(&entries);
            assert_eq!(
                order(&output),
                order(&baseline),
                "divergent order with seed {seed}"
            );
        }
    }

    #[test]
    fn test_sort_is_idempotent_and_validation_clean_after() {
        let mut once = sorted(&entries_from(workshop_modules()));
        let twice = sorted(&once);
        assert_eq!(order(&once), order(&twice));

        validate(&mut once);
        assert!(once.iter().all(|entry| !entry.has_conflicts()));
    }

    #[test]
    fn test_unconstrained_entries_keep_load_order() {
        let output = sorted(&entries_from(workshop_modules()));

        // Harmony, UIExtender and MiscFix have no path between one another;
        // their load-time order (Harmony < UIExtender < MiscFix) survives.
        let position = |id: &str| {
            order(&output)
                .iter()
                .position(|candidate| *candidate == id)
                .unwrap()
        };
        assert!(position("Harmony") < position("UIExtender"));
        assert!(position("UIExtender") < position("MiscFix"));
    }
}
