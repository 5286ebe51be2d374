use ramlgen::generator::{
    classify, from_body, from_declared_type, Classification, GenerateOptions, Generator, GoTypes,
    Language, Mode, RustTypes, StructureKind, TemplateSet, TypeConverter,
};
use ramlgen::spec::{load_api, DeclaredType, JsonBody, Property, TypeExpr, TypeFlags};
use std::fs;
use std::path::Path;

fn fixture() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/users.raml"))
}

fn flags(f: impl FnOnce(&mut TypeFlags)) -> TypeFlags {
    let mut flags = TypeFlags::default();
    f(&mut flags);
    flags
}

#[test]
fn test_classifier_precedence() {
    let object_enum = DeclaredType::new(TypeExpr::Single("object".into()))
        .with_flags(flags(|f| f.enumeration = true));
    assert_eq!(classify(&object_enum), Classification::PlainObject);

    let union_array = DeclaredType::new(TypeExpr::Single("(A | B)[]".into()))
        .with_flags(flags(|f| {
            f.union = true;
            f.array = true;
        }));
    assert_eq!(classify(&union_array).kind(), StructureKind::Union);

    let multi = DeclaredType::new(TypeExpr::parse("A, B"))
        .with_flags(flags(|f| f.map = true));
    assert_eq!(classify(&multi).kind(), StructureKind::MultipleInheritance);
}

#[test]
fn test_union_alias_per_language() {
    let decl = DeclaredType::new(TypeExpr::Single("Cat | Dog".into()))
        .with_flags(flags(|f| f.union = true));
    let go = from_declared_type("Pet", &decl, "main", &GoTypes);
    let rs = from_declared_type("Pet", &decl, "api", &RustTypes);
    assert_eq!(go.one_line_def, GoTypes.convert_union("Cat | Dog"));
    assert_eq!(rs.one_line_def, "serde_json::Value");
    assert!(go.fields.is_empty() && rs.fields.is_empty());
}

#[test]
fn test_body_with_map_payload() {
    let body = JsonBody {
        properties: vec![Property::new("//", "number")],
        flags: flags(|f| f.map = true),
        ..JsonBody::default()
    };
    let sd = from_body("ScoresGet", &body, "main", false, &GoTypes);
    assert_eq!(sd.name, "ScoresGetResp");
    assert_eq!(sd.one_line_def, "map[string]float64");
}

#[test]
fn test_generate_all_from_fixture() {
    let api = load_api(fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let generator =
        Generator::new(Language::Go, "users", TemplateSet::builtin(Language::Go)).unwrap();
    let report = generator
        .generate_all(&api, dir.path(), Mode::Server, Default::default())
        .unwrap();

    assert_eq!(report.types.len(), 9);
    assert_eq!(report.bodies.len(), 4);
    assert_eq!(report.resources.len(), 2);
    for file in [
        "User.go",
        "Pet.go",
        "UsersPostReq.go",
        "UsersIdGetResp.go",
        "users_if.go",
        "users_api.go",
        "health_if.go",
        "health_api.go",
    ] {
        assert!(dir.path().join(file).exists(), "missing {file}");
    }
    let user = fs::read_to_string(dir.path().join("User.go")).unwrap();
    assert!(user.contains("package users\n"));
    assert!(!dir.path().join("mod.rs").exists());
}

#[test]
fn test_template_override_dir() {
    let api = load_api(fixture()).unwrap();
    let templates = tempfile::tempdir().unwrap();
    fs::write(
        templates.path().join("struct.go.txt"),
        "// {{ name }} is {{ kind }}\n",
    )
    .unwrap();
    let out = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        template_dir: Some(templates.path().to_path_buf()),
        output: out.path().to_path_buf(),
        format: false,
        ..GenerateOptions::default()
    };
    let generator = Generator::from_options(&options).unwrap();
    generator
        .generate_catalog_structures(&api, out.path())
        .unwrap();
    assert_eq!(
        fs::read_to_string(out.path().join("Tags.go")).unwrap(),
        "// Tags is array\n"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("Cat.go")).unwrap(),
        "// Cat is single_inheritance\n"
    );
}
