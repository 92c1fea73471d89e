use std::collections::HashSet;
use std::path::Path;

fn main() {
    let table_path = Path::new("data/cog_categories.json");
    validate_category_file(table_path);
    set_build_dependencies();
}

fn validate_category_file(table_path: &Path) {
    // Ensure the category table exists at build time
    assert!(
        table_path.exists(),
        "\n\nCATEGORY TABLE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the category table before building.\n",
        table_path.display()
    );

    let contents = std::fs::read_to_string(table_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATEGORY TABLE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            table_path.display()
        );
    });

    let table: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATEGORY TABLE BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            table_path.display()
        );
    });

    validate_table_structure(&table);
}

fn validate_table_structure(table: &serde_json::Value) {
    assert!(
        table.is_object(),
        "\n\nCATEGORY TABLE BUILD ERROR: Root must be a JSON object\n\
         Got: {table}\n"
    );

    let categories = table
        .get("categories")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATEGORY TABLE BUILD ERROR: Missing 'categories' array\n\
                 The table must have a top-level 'categories' array.\n"
            );
        });

    let mut seen = HashSet::new();
    for (i, category) in categories.iter().enumerate() {
        let code = category
            .get("code")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nCATEGORY TABLE BUILD ERROR: Category at index {i} missing 'code'\n")
            });
        assert!(
            code.len() == 1 && code.chars().all(|c| c.is_ascii_uppercase()),
            "\n\nCATEGORY TABLE BUILD ERROR: Category code '{code}' must be a single uppercase letter\n"
        );
        assert!(
            seen.insert(code.to_string()),
            "\n\nCATEGORY TABLE BUILD ERROR: Duplicate category code '{code}'\n"
        );
        validate_color(category, code);
    }

    let unassigned = table.get("unassigned").unwrap_or_else(|| {
        panic!("\n\nCATEGORY TABLE BUILD ERROR: Missing 'unassigned' entry\n");
    });
    validate_color(unassigned, "-");

    let rna = table
        .get("rna")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!("\n\nCATEGORY TABLE BUILD ERROR: Missing 'rna' array\n");
        });
    for entry in rna {
        let kind = entry
            .get("kind")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<unknown>");
        validate_color(entry, kind);
    }

    println!(
        "cargo:warning=Validated category table: {} categories, {} RNA classes",
        categories.len(),
        rna.len()
    );
}

fn validate_color(entry: &serde_json::Value, label: &str) {
    let color = entry
        .get("color")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!("\n\nCATEGORY TABLE BUILD ERROR: '{label}' missing 'color' array\n")
        });
    assert!(
        color.len() == 3
            && color
                .iter()
                .all(|c| c.as_u64().is_some_and(|value| value <= 255)),
        "\n\nCATEGORY TABLE BUILD ERROR: '{label}' color must be three integers in 0..=255\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the category table changes
    println!("cargo:rerun-if-changed=data/cog_categories.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
