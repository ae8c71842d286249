//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Edit commands load the tree file into a fresh store, apply one mutation
//! and write the resulting snapshot back to the same file.

use crate::api::{self, validate_fields};
use kinship_core::{
    FamilyGraph, FamilyMetrics, FamilyStore, KinshipError, Person, PersonFields, PersonId,
    PersonUpdate, audit, compute_generations, generation_label, generation_level,
    graph_from_json, graph_to_json, primitives::MAX_SNAPSHOT_SIZE, sample::smith_family,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), KinshipError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| KinshipError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(KinshipError::DeserializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path: canonical, existing, and a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, KinshipError> {
    let canonical = path.canonicalize().map_err(|e| {
        KinshipError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(KinshipError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, KinshipError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let canonical_parent = parent.canonicalize().map_err(|e| {
        KinshipError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(KinshipError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| KinshipError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// TREE FILES
// =============================================================================

/// Load the tree file, or the sample family when no file is configured.
pub fn load_tree(tree: Option<&Path>) -> Result<FamilyGraph, KinshipError> {
    let Some(path) = tree else {
        tracing::debug!("no tree file configured, using the sample family");
        return Ok(smith_family());
    };

    let path = validate_file_path(path)?;
    validate_file_size(&path, MAX_SNAPSHOT_SIZE as u64)?;

    let text = std::fs::read_to_string(&path)
        .map_err(|e| KinshipError::IoError(format!("Read tree: {}", e)))?;
    let graph = graph_from_json(&text)?;
    tracing::debug!(path = %path.display(), people = graph.len(), "tree loaded");
    Ok(graph)
}

/// Write a snapshot to a tree file.
pub fn save_tree(graph: &FamilyGraph, path: &Path) -> Result<(), KinshipError> {
    let path = validate_output_path(path)?;
    let text = graph_to_json(graph)?;
    std::fs::write(&path, text).map_err(|e| KinshipError::IoError(format!("Write tree: {}", e)))?;
    tracing::debug!(path = %path.display(), people = graph.len(), "tree written");
    Ok(())
}

fn require_tree(tree: Option<&Path>) -> Result<&Path, KinshipError> {
    tree.ok_or_else(|| {
        KinshipError::ConfigError(
            "Editing needs a tree file: pass --tree or set [tree] file".to_string(),
        )
    })
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// `Name (id)`.
fn describe(person: &Person) -> String {
    format!("{} ({})", person.name, person.id)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(tree: Option<&Path>, host: &str, port: u16) -> Result<(), KinshipError> {
    let graph = load_tree(tree)?;
    let people = graph.len();
    let store = FamilyStore::from_graph(graph);

    println!("Kinship Family Tree Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:   {}", host);
    println!("  Port:   {}", port);
    match tree {
        Some(path) => println!("  Tree:   {} ({} people)", path.display(), people),
        None => println!("  Tree:   sample family ({} people)", people),
    }
    println!();
    println!("Endpoints:");
    println!("  GET   /tree                  - Full snapshot");
    println!("  GET   /generations           - Generation layout");
    println!("  GET   /people/{{id}}           - One person");
    println!("  POST  /people/{{id}}/children  - Add a child");
    println!("  POST  /people/{{id}}/spouse    - Add a spouse");
    println!("  PATCH /people/{{id}}           - Update a person");
    println!("  GET   /status                - Family metrics");
    println!("  GET   /health                - Health check");
    println!();
    println!("Edits live in memory; the tree file is not rewritten.");
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, store).await
}

// =============================================================================
// READ COMMANDS
// =============================================================================

/// Print the generation layout.
pub fn cmd_generations(tree: Option<&Path>, json_mode: bool) -> Result<(), KinshipError> {
    let graph = load_tree(tree)?;
    let generations = compute_generations(&graph);

    if json_mode {
        let output: Vec<api::GenerationResponse> = generations
            .into_iter()
            .map(api::GenerationResponse::from)
            .collect();
        print_json(&serde_json::json!(output));
        return Ok(());
    }

    for generation in &generations {
        println!("{} ({} people)", generation.label(), generation.member_count());
        for couple in &generation.couples {
            println!(
                "  {} & {}",
                describe(&couple.person1),
                describe(&couple.person2)
            );
        }
        for single in &generation.singles {
            println!("  {}", describe(single));
        }
        println!();
    }

    Ok(())
}

/// Print one person with resolved relatives.
pub fn cmd_show(tree: Option<&Path>, json_mode: bool, id: &str) -> Result<(), KinshipError> {
    let graph = load_tree(tree)?;
    let id = PersonId::from(id);
    let person = graph
        .get(&id)
        .ok_or_else(|| KinshipError::PersonNotFound(id.clone()))?;

    let level = generation_level(&graph, &id);
    let spouse = graph.spouse_of(&id);
    let parents: Vec<&Person> = graph.parents_of(&id).collect();
    let children: Vec<&Person> = graph.children_of(&id).collect();

    if json_mode {
        print_json(&serde_json::json!({
            "person": person,
            "level": level,
            "label": generation_label(level),
            "spouse": spouse,
            "parents": parents,
            "children": children,
        }));
        return Ok(());
    }

    let list = |people: &[&Person]| {
        if people.is_empty() {
            "-".to_string()
        } else {
            people
                .iter()
                .map(|p| describe(p))
                .collect::<Vec<_>>()
                .join(", ")
        }
    };

    println!("{}", describe(person));
    println!("  Gender:     {}", person.gender);
    if let Some(lifespan) = person.lifespan_label() {
        println!("  Lifespan:   {}", lifespan);
    }
    if let Some(occupation) = &person.occupation {
        println!("  Occupation: {}", occupation);
    }
    println!("  Generation: {}", generation_label(level));
    println!("  Spouse:     {}", spouse.map_or_else(|| "-".to_string(), describe));
    println!("  Parents:    {}", list(&parents));
    println!("  Children:   {}", list(&children));
    if let Some(bio) = &person.bio {
        println!();
        println!("  {}", bio);
    }

    Ok(())
}

/// Print link issues. Issues are informational and never fail the command.
pub fn cmd_audit(tree: Option<&Path>, json_mode: bool) -> Result<(), KinshipError> {
    let graph = load_tree(tree)?;
    let issues = audit(&graph);

    if json_mode {
        print_json(&serde_json::json!(issues));
        return Ok(());
    }

    if issues.is_empty() {
        println!("No link issues ({} people checked)", graph.len());
        return Ok(());
    }

    println!("{} link issue(s):", issues.len());
    for issue in &issues {
        println!("  {}", issue);
    }
    Ok(())
}

/// Print family metrics.
pub fn cmd_status(tree: Option<&Path>, json_mode: bool) -> Result<(), KinshipError> {
    let graph = load_tree(tree)?;
    let metrics = FamilyMetrics::from_graph(&graph);
    let source = tree.map_or_else(|| "sample family".to_string(), |p| p.display().to_string());

    if json_mode {
        print_json(&serde_json::json!({
            "tree": source,
            "rootPersonId": graph.root_person_id(),
            "metrics": metrics,
        }));
        return Ok(());
    }

    println!("Kinship Tree Status");
    println!("===================");
    println!("Tree: {}", source);
    println!(
        "Root: {}",
        graph
            .root()
            .map_or_else(|| graph.root_person_id().to_string(), describe)
    );
    println!();
    println!("People:        {}", metrics.people);
    println!("Couples:       {}", metrics.couples);
    println!("Singles:       {}", metrics.singles);
    println!("Generations:   {}", metrics.generations);
    println!("Deepest Level: {}", metrics.deepest_level);
    println!("Deceased:      {}", metrics.deceased);
    println!("Link Issues:   {}", metrics.link_issues);

    Ok(())
}

/// Write the sample family to `output`.
pub fn cmd_sample(output: &Path) -> Result<(), KinshipError> {
    let graph = smith_family();
    save_tree(&graph, output)?;
    println!("Wrote sample family ({} people) to {:?}", graph.len(), output);
    Ok(())
}

// =============================================================================
// EDIT COMMANDS
// =============================================================================

fn report_created(json_mode: bool, what: &str, id: &PersonId, path: &Path) {
    if json_mode {
        print_json(&serde_json::json!({ "id": id }));
    } else {
        println!("Added {} {} to {:?}", what, id, path);
    }
}

/// Add a child, either under explicit parents or under `of` and their spouse.
pub fn cmd_add_child(
    tree: Option<&Path>,
    json_mode: bool,
    parents: &[String],
    of: Option<&str>,
    fields: PersonFields,
) -> Result<(), KinshipError> {
    validate_fields(&fields)?;
    let path = require_tree(tree)?;
    let mut store = FamilyStore::from_graph(load_tree(Some(path))?);

    let id = match of {
        Some(person) => store.add_child_of(&PersonId::from(person), fields)?,
        None => {
            let parent_ids: Vec<PersonId> = parents.iter().map(PersonId::new).collect();
            store.add_child(&parent_ids, fields)?
        }
    };

    save_tree(&store.snapshot(), path)?;
    report_created(json_mode, "child", &id, path);
    Ok(())
}

/// Add a spouse to `id`.
pub fn cmd_add_spouse(
    tree: Option<&Path>,
    json_mode: bool,
    id: &str,
    fields: PersonFields,
) -> Result<(), KinshipError> {
    validate_fields(&fields)?;
    let path = require_tree(tree)?;
    let mut store = FamilyStore::from_graph(load_tree(Some(path))?);

    let spouse = store.add_spouse(&PersonId::from(id), fields)?;

    save_tree(&store.snapshot(), path)?;
    report_created(json_mode, "spouse", &spouse, path);
    Ok(())
}

/// Apply a partial update to `id`. Unknown ids leave the file untouched.
pub fn cmd_update(
    tree: Option<&Path>,
    json_mode: bool,
    id: &str,
    update: &PersonUpdate,
) -> Result<(), KinshipError> {
    api::validate_update(update)?;
    let path = require_tree(tree)?;
    let mut store = FamilyStore::from_graph(load_tree(Some(path))?);
    let id = PersonId::from(id);

    let applied = store.update_person(&id, update);
    if applied {
        save_tree(&store.snapshot(), path)?;
    }

    if json_mode {
        print_json(&serde_json::json!({ "id": id, "applied": applied }));
    } else if applied {
        println!("Updated {} in {:?}", id, path);
    } else {
        println!("No person {} in {:?}; nothing changed", id, path);
    }
    Ok(())
}
