//! Go to definition tests for the IDE layer.

use std::sync::Arc;

use cfml::base::{FileId, Location, Span};
use cfml::hir::{
    AccessorFlag, Argument, Component, ComponentRef, DocumentContext, Property, Scope,
    UserFunction, Variable,
};
use cfml::config::GotoConfig;
use cfml::ide::{NoApplicationFiles, ReferencePattern, TargetKind};
use rstest::rstest;

use crate::helpers::goto_helpers::*;
use crate::helpers::source_fixtures::{ACCESSOR_COMPONENT, LOCALS_COMPONENT, VARIABLES_COMPONENT};

/// A workspace with `models.User`, `models.Base` and `services.Mail` cached under `/app`.
fn models() -> (Workspace, Arc<Component>, Arc<Component>, Arc<Component>) {
    let workspace = Workspace::new();
    let user = workspace.file("/app/models/User.cfc");
    let base = workspace.file("/app/models/Base.cfc");
    let mail = workspace.file("/app/services/Mail.cfc");

    let user = workspace.add(Component::new(user, "User", Span::from_coords(0, 0, 0, 9)));
    let base = workspace.add(Component::new(base, "Base", Span::from_coords(0, 0, 0, 9)));
    let mail = workspace.add(Component::new(mail, "Mail", Span::from_coords(0, 0, 0, 9)));
    (workspace, user, base, mail)
}

fn template(workspace: &Workspace, text: &str, needle: &str, word: &str) -> DocumentContext {
    let file = workspace.file("/app/index.cfm");
    DocumentContext::new(file, text, cursor_on(text, needle, word))
}

// =============================================================================
// REFERENCE PATTERNS
// =============================================================================

#[tokio::test]
async fn test_goto_component_from_new() {
    let (workspace, user, _, _) = models();
    let text = "user = new models.User();";
    let context = template(&workspace, text, "models.User", "User");

    let result = workspace.goto(&context).await;

    assert_eq!(locations(&result), vec![(user.file, user.declaration_range)]);
    assert_eq!(result.targets[0].kind, TargetKind::Component);
    assert_eq!(result.targets[0].name, "User");
}

#[tokio::test]
async fn test_only_last_path_segment_navigates() {
    let (workspace, _, _, _) = models();
    let text = "user = new models.User();";
    let context = template(&workspace, text, "models.User", "models");

    assert!(workspace.goto(&context).await.is_empty());
}

#[tokio::test]
async fn test_goto_component_from_create_object() {
    let (workspace, _, _, mail) = models();
    let text = r#"mailer = createObject("component", "services.Mail");"#;
    let context = template(&workspace, text, "services.Mail", "Mail");

    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(mail.file, mail.declaration_range)]
    );
}

#[tokio::test]
async fn test_goto_component_from_tag_attribute() {
    let (workspace, _, _, mail) = models();
    let text = "<cfset target = \"http://example.com\">\n<cfinvoke component=\"services.Mail\" method=\"send\">";
    let file = workspace.file("/app/index.cfm");
    let context = DocumentContext::with_dialect(file, text, cursor_on(text, "services.Mail", "Mail"), false);

    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(mail.file, mail.declaration_range)]
    );
}

#[tokio::test]
async fn test_unresolved_path_yields_nothing() {
    let (workspace, _, _, _) = models();
    let text = "thing = new models.Missing();";
    let context = template(&workspace, text, "models.Missing", "Missing");

    assert!(workspace.goto(&context).await.is_empty());
}

#[tokio::test]
async fn test_every_matching_pattern_reports_its_target() {
    let (workspace, user, _, _) = models();
    let text = "u = new models.User();";
    let context = template(&workspace, text, "models.User", "User");
    let mut config = GotoConfig::default();
    config.reference_patterns.push(
        ReferencePattern::new("constructor", r"\bnew\s+(?P<path>[\w.]+)\s*\(").expect("pattern compiles"),
    );

    let result = workspace.goto_with(&context, &NoApplicationFiles, &config).await;
    assert_eq!(
        locations(&result),
        vec![
            (user.file, user.declaration_range),
            (user.file, user.declaration_range),
        ]
    );
}

#[tokio::test]
async fn test_slashes_inside_strings_are_not_comments() {
    let (workspace, user, _, _) = models();
    let text = r#"url = "http://host/"; user = new models.User();"#;
    let context = template(&workspace, text, "models.User", "User");

    let result = workspace.goto(&context).await;
    assert!(!result.is_in_comment());
    assert_eq!(locations(&result), vec![(user.file, user.declaration_range)]);
}

// =============================================================================
// COMMENTS
// =============================================================================

#[rstest]
#[case("// user = new models.User();\nx = 1;")]
#[case("/* user = new models.User(); */ x = 1;")]
#[case("x = 1; /*\n user = new models.User();\n*/")]
fn test_cursor_in_script_comment_stops(#[case] text: &str) {
    let (workspace, _, _, _) = models();
    let context = template(&workspace, text, "models.User", "User");

    let result = block_on(workspace.goto(&context));
    assert!(result.is_in_comment());
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_cursor_in_tag_comment_stops() {
    let (workspace, _, _, _) = models();
    let text = "<!--- <cfset user = new models.User()> --->\n<cfoutput>#now()#</cfoutput>";
    let file = workspace.file("/app/index.cfm");
    let context = DocumentContext::with_dialect(file, text, cursor_on(text, "models.User", "User"), false);

    assert!(workspace.goto(&context).await.is_in_comment());
}

#[tokio::test]
async fn test_commented_reference_is_not_scanned() {
    let (workspace, user, _, _) = models();
    let text = "// user = new models.User();\nuser = new models.User();";
    let context = template(&workspace, text, "\nuser = new models.User", "User");

    let result = workspace.goto(&context).await;
    assert!(!result.is_in_comment());
    assert_eq!(locations(&result), vec![(user.file, user.declaration_range)]);
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build")
        .block_on(future)
}

// =============================================================================
// TYPE REFERENCES
// =============================================================================

const TYPED_SERVICE: &str = r#"component extends="models.Base" {
    property name="mailer" type="services.Mail";
    public models.User function find(models.User prototype) {}
}
"#;

fn typed_service(workspace: &Workspace) -> Arc<Component> {
    let text = TYPED_SERVICE;
    let file = workspace.file("/app/Service.cfc");
    let user_type = |nth| ComponentRef::new("models.User", span_of_nth(text, "models.User", nth));

    workspace.add(
        Component::new(file, "Service", span_of(text, "component"))
            .with_extends(ComponentRef::new("models.Base", span_of(text, "models.Base")))
            .with_property(
                Property::new("mailer", span_of(text, "mailer"))
                    .with_type(ComponentRef::new("services.Mail", span_of(text, "services.Mail"))),
            )
            .with_function(
                UserFunction::new("find", span_of(text, "find"))
                    .with_return_type(user_type(0))
                    .with_signature(cfml::hir::Signature::new(vec![
                        Argument::new("prototype", span_of(text, "prototype")).with_type(user_type(1)),
                    ])),
            ),
    )
}

#[tokio::test]
async fn test_goto_property_type() {
    let (workspace, _, _, mail) = models();
    let service = typed_service(&workspace);
    let position = cursor_on(TYPED_SERVICE, "services.Mail", "Mail");
    let context = DocumentContext::for_component(TYPED_SERVICE, position, service);

    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(mail.file, mail.declaration_range)]
    );
}

#[rstest]
#[case("public models.User")]
#[case("(models.User")]
#[tokio::test]
async fn test_goto_function_types(#[case] needle: &str) {
    let (workspace, user, _, _) = models();
    let service = typed_service(&workspace);
    let position = cursor_on(TYPED_SERVICE, needle, "User");
    let context = DocumentContext::for_component(TYPED_SERVICE, position, service);

    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(user.file, user.declaration_range)]
    );
}

#[tokio::test]
async fn test_extends_reports_pattern_and_type_reference_hits() {
    let (workspace, _, base, _) = models();
    let service = typed_service(&workspace);
    let position = cursor_on(TYPED_SERVICE, "models.Base", "Base");
    let context = DocumentContext::for_component(TYPED_SERVICE, position, service);

    // The `extends` pattern and the `extends` type reference both resolve.
    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![
            (base.file, base.declaration_range),
            (base.file, base.declaration_range),
        ]
    );
}

// =============================================================================
// ARGUMENTS AND LOCALS
// =============================================================================

fn locals_component(workspace: &Workspace) -> Arc<Component> {
    let text = LOCALS_COMPONENT;
    let file = workspace.file("/app/Cart.cfc");
    let body = Span::new(span_of_nth(text, "{", 1).start, span_of_nth(text, "}", 0).end);

    workspace.add(
        Component::new(file, "Cart", span_of(text, "component")).with_function(
            UserFunction::new("total", span_of(text, "total"))
                .with_signature(cfml::hir::Signature::new(vec![
                    Argument::new("items", span_of(text, "items")),
                    Argument::new("tax", span_of(text, "tax")),
                ]))
                .with_body(body),
        ),
    )
}

async fn goto_in_locals(needle: &str, word: &str) -> (FileId, cfml::ide::GotoResult) {
    let workspace = Workspace::new();
    let component = locals_component(&workspace);
    let file = component.file;
    let context = DocumentContext::for_component(
        LOCALS_COMPONENT,
        cursor_on(LOCALS_COMPONENT, needle, word),
        component,
    );
    (file, workspace.goto(&context).await)
}

#[tokio::test]
async fn test_goto_argument_through_arguments_scope() {
    let (file, result) = goto_in_locals("arguments.items", "items").await;

    assert_eq!(
        locations(&result),
        vec![(file, span_of(LOCALS_COMPONENT, "items"))]
    );
    assert_eq!(result.targets[0].kind, TargetKind::Argument);
}

#[tokio::test]
async fn test_unqualified_argument_needs_arguments_scope() {
    let (_, result) = goto_in_locals("+ tax", "tax").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_goto_var_declared_before_cursor() {
    let (file, result) = goto_in_locals("return sum", "sum").await;

    assert_eq!(
        locations(&result),
        vec![(file, span_of_nth(LOCALS_COMPONENT, "sum", 1))]
    );
    assert_eq!(result.targets[0].kind, TargetKind::Variable(Scope::Local));
}

#[tokio::test]
async fn test_local_declared_after_cursor_is_invisible() {
    let (_, result) = goto_in_locals("log(sum)", "sum").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_goto_local_scope_assignment() {
    let (file, result) = goto_in_locals("local.count +", "count").await;

    assert_eq!(
        locations(&result),
        vec![(file, span_of(LOCALS_COMPONENT, "count"))]
    );
}

/// A context with the cursor inside the last (case-insensitive) occurrence of `name`.
fn cursor_on_last(text: &str, name: &str, component: Arc<Component>) -> DocumentContext {
    let start = text.to_lowercase().rfind(&name.to_lowercase()).unwrap_or_default();
    DocumentContext::for_component(text, position_at(text, start + 1), component)
}

fn function_body(text: &str) -> Span {
    Span::new(span_of_nth(text, "{", 1).start, span_of_nth(text, "}", 0).end)
}

#[rstest]
#[case("arguments.items")]
#[case("arguments.ITEMS")]
#[case("ARGUMENTS.Items")]
#[tokio::test]
async fn test_arguments_ignore_case(#[case] reference: &str) {
    let workspace = Workspace::new();
    let text = format!("component {{\n    function total(Items) {{\n        return {reference};\n    }}\n}}\n");
    let file = workspace.file("/app/Cart.cfc");
    let component = workspace.add(
        Component::new(file, "Cart", span_of(&text, "component")).with_function(
            UserFunction::new("total", span_of(&text, "total"))
                .with_signature(cfml::hir::Signature::new(vec![Argument::new(
                    "Items",
                    span_of(&text, "Items"),
                )]))
                .with_body(function_body(&text)),
        ),
    );

    let context = cursor_on_last(&text, "items", component);
    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(file, span_of(&text, "Items"))]
    );
}

#[rstest]
#[case("total")]
#[case("TOTAL")]
#[case("local.TOTAL")]
#[tokio::test]
async fn test_locals_ignore_case(#[case] reference: &str) {
    let workspace = Workspace::new();
    let text = format!(
        "component {{\n    function total() {{\n        var Total = 0;\n        return {reference};\n    }}\n}}\n"
    );
    let file = workspace.file("/app/Cart.cfc");
    let component = workspace.add(
        Component::new(file, "Cart", span_of(&text, "component")).with_function(
            UserFunction::new("total", span_of(&text, "total")).with_body(function_body(&text)),
        ),
    );

    let context = cursor_on_last(&text, "total", component);
    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(file, span_of(&text, "Total"))]
    );
}

// =============================================================================
// SYNTHESIZED ACCESSORS
// =============================================================================

fn accessor_component(workspace: &Workspace, accessors: bool) -> Component {
    let text = ACCESSOR_COMPONENT;
    let file = workspace.file("/app/Person.cfc");

    Component::new(file, "Person", span_of(text, "component"))
        .with_accessors(accessors)
        .with_property(Property::new("firstName", span_of(text, "firstName")))
        .with_property(
            Property::new("lastName", span_of(text, "lastName")).with_getter(AccessorFlag::Disabled),
        )
        .with_function(UserFunction::new("describe", span_of(text, "describe")))
}

async fn goto_accessor(component: Component, workspace: &Workspace, needle: &str, word: &str) -> Vec<(FileId, Span)> {
    let component = workspace.add(component);
    let context = DocumentContext::for_component(
        ACCESSOR_COMPONENT,
        cursor_on(ACCESSOR_COMPONENT, needle, word),
        component,
    );
    locations(&workspace.goto(&context).await)
}

#[tokio::test]
async fn test_generated_getter_resolves_to_property() {
    let workspace = Workspace::new();
    let component = accessor_component(&workspace, true);
    let file = component.file;

    let result = goto_accessor(component, &workspace, "return this.getFirstName", "getFirstName").await;
    assert_eq!(result, vec![(file, span_of(ACCESSOR_COMPONENT, "firstName"))]);
}

#[tokio::test]
async fn test_generated_setter_resolves_to_property() {
    let workspace = Workspace::new();
    let component = accessor_component(&workspace, true);
    let file = component.file;

    let result = goto_accessor(component, &workspace, "this.setLastName", "setLastName").await;
    assert_eq!(result, vec![(file, span_of(ACCESSOR_COMPONENT, "lastName"))]);
}

#[tokio::test]
async fn test_disabled_getter_is_not_generated() {
    let workspace = Workspace::new();
    let component = accessor_component(&workspace, true);

    let result = goto_accessor(component, &workspace, "this.getLastName", "getLastName").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_accessors_off_generates_nothing() {
    let workspace = Workspace::new();
    let component = accessor_component(&workspace, false);

    let result = goto_accessor(component, &workspace, "return this.getFirstName", "getFirstName").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_accessor_needs_this_scope() {
    let workspace = Workspace::new();
    let component = accessor_component(&workspace, true);

    let result = goto_accessor(component, &workspace, "        getFirstName();", "getFirstName").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_explicit_function_suppresses_accessor() {
    let workspace = Workspace::new();
    let explicit = Span::from_coords(20, 13, 20, 25);
    let component = accessor_component(&workspace, true)
        .with_function(UserFunction::new("getFirstName", explicit));
    let file = component.file;

    let result = goto_accessor(component, &workspace, "return this.getFirstName", "getFirstName").await;
    assert_eq!(result, vec![(file, explicit)]);
}

#[rstest]
#[case("this.getFirstName()")]
#[case("THIS.GETFIRSTNAME()")]
#[case("this.setfirstname( 1 )")]
#[tokio::test]
async fn test_accessors_ignore_case(#[case] call: &str) {
    let workspace = Workspace::new();
    let text = format!("component accessors=\"true\" {{\n    property name=\"firstName\";\n    function f() {{ return {call}; }}\n}}\n");
    let file = workspace.file("/app/Person.cfc");
    let component = workspace.add(
        Component::new(file, "Person", span_of(&text, "component"))
            .with_accessors(true)
            .with_property(Property::new("firstName", span_of(&text, "firstName"))),
    );
    let accessor_start = text.to_lowercase().rfind("firstname").unwrap_or_default() - 3;
    let context = DocumentContext::for_component(&text, position_at(&text, accessor_start + 1), component);

    assert_eq!(
        locations(&workspace.goto(&context).await),
        vec![(file, span_of(&text, "firstName"))]
    );
}

// =============================================================================
// COMPONENT VARIABLES
// =============================================================================

fn variables_component(workspace: &Workspace) -> Arc<Component> {
    let text = VARIABLES_COMPONENT;
    let file = workspace.file("/app/Cache.cfc");
    let assignment = |nth| {
        Variable::new(
            "cache",
            Scope::Variables,
            Location::new(file, span_of_nth(text, "cache", nth)),
        )
    };

    workspace.add(
        Component::new(file, "Cache", span_of(text, "component"))
            .with_variable(assignment(0))
            .with_variable(assignment(1))
            .with_function(UserFunction::new("get", span_of(text, "get"))),
    )
}

#[tokio::test]
async fn test_goto_every_component_assignment() {
    let workspace = Workspace::new();
    let component = variables_component(&workspace);
    let file = component.file;
    let context = DocumentContext::for_component(
        VARIABLES_COMPONENT,
        cursor_on(VARIABLES_COMPONENT, "return variables.cache", "cache"),
        component,
    );

    let result = workspace.goto(&context).await;
    assert_eq!(
        locations(&result),
        vec![
            (file, span_of_nth(VARIABLES_COMPONENT, "cache", 0)),
            (file, span_of_nth(VARIABLES_COMPONENT, "cache", 1)),
        ]
    );
    assert_eq!(result.targets[0].kind, TargetKind::Variable(Scope::Variables));
}

#[tokio::test]
async fn test_member_of_other_object_is_not_a_component_variable() {
    let workspace = Workspace::new();
    let component = variables_component(&workspace);
    let context = DocumentContext::for_component(
        VARIABLES_COMPONENT,
        cursor_on(VARIABLES_COMPONENT, "other.cache", "cache"),
        component,
    );

    assert!(workspace.goto(&context).await.is_empty());
}

#[rstest]
#[case("cache")]
#[case("CACHE")]
#[case("variables.CACHE")]
#[case("Variables.Cache")]
#[tokio::test]
async fn test_component_variables_ignore_case(#[case] reference: &str) {
    let workspace = Workspace::new();
    let text = format!("component {{\n    variables.cache = {{}};\n    function get() {{\n        return {reference};\n    }}\n}}\n");
    let file = workspace.file("/app/Cache.cfc");
    let declared = span_of(&text, "cache");
    let component = workspace.add(
        Component::new(file, "Cache", span_of(&text, "component"))
            .with_variable(Variable::new("cache", Scope::Variables, Location::new(file, declared)))
            .with_function(UserFunction::new("get", span_of(&text, "get"))),
    );

    let context = cursor_on_last(&text, "cache", component);
    assert_eq!(locations(&workspace.goto(&context).await), vec![(file, declared)]);
}
