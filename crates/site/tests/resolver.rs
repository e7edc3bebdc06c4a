use mdxmap_site::registry::{
    Binding, Component, ComponentSet, HIGHLIGHT_BOX_CLASS, PropValue, Props, TagResolver,
    Variant, site_tags,
};
use std::sync::{Arc, Mutex};

/// Remembers every invocation it receives.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<(Props, String)>>,
}

impl Component for Recorder {
    fn name(&self) -> &str {
        "Recorder"
    }

    fn render(&self, props: &Props, children: &str) -> String {
        self.calls
            .lock()
            .unwrap()
            .push((props.clone(), children.to_string()));
        format!("<recorded>{children}</recorded>")
    }
}

fn both_variants() -> [Variant; 2] {
    [Variant::Current, Variant::Legacy]
}

#[test]
fn every_bound_tag_renders_something() {
    let components = ComponentSet::placeholders();
    for variant in both_variants() {
        for redesign in [false, true] {
            let tags = TagResolver::new(variant, &components, redesign);
            for (tag, binding) in tags.html_components().iter().chain(tags.mdx_components().iter()) {
                let html = binding.render(&Props::new(), "x");
                assert!(html.contains('x'), "{tag} rendered {html:?}");
            }
        }
    }
}

#[test]
fn anchor_always_binds_the_link_component() {
    let components = ComponentSet::placeholders();
    for variant in both_variants() {
        for redesign in [false, true] {
            let tags = TagResolver::new(variant, &components, redesign);
            let binding = tags.resolve_html("a").expect("a is always bound");
            assert!(binding.is(&components.link));
        }
    }
}

#[test]
fn redesign_binds_the_blockquote_component() {
    let components = ComponentSet::placeholders();
    let tags = TagResolver::new(Variant::Current, &components, true);
    let binding = tags.resolve_html("blockquote").unwrap();
    assert!(binding.is(&components.blockquote));
    assert!(tags.website_redesign());
}

#[test]
fn without_redesign_blockquote_is_a_highlight_box() {
    let components = ComponentSet::placeholders();
    for variant in both_variants() {
        let tags = TagResolver::new(variant, &components, false);
        let binding = tags.resolve_html("blockquote").unwrap();
        assert!(matches!(binding, Binding::HighlightBox));
        assert!(binding.target().is_none());
        assert_eq!(
            binding.render(&Props::new(), "hello"),
            format!("<div class=\"{HIGHLIGHT_BOX_CLASS}\">hello</div>")
        );
    }
}

#[test]
fn pre_forwards_props_and_children_unchanged() {
    let recorder = Arc::new(Recorder::default());
    let components = ComponentSet {
        code_box: recorder.clone(),
        ..ComponentSet::placeholders()
    };
    let tags = TagResolver::new(Variant::Current, &components, false);

    let mut props = Props::new();
    props.insert("lang".to_string(), PropValue::literal("js"));
    let html = tags.resolve_html("pre").unwrap().render(&props, "code");

    assert_eq!(html, "<recorded>code</recorded>");
    let calls = recorder.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, props);
    assert_eq!(calls[0].1, "code");
}

#[test]
fn shortcodes_bind_their_components() {
    let components = ComponentSet::placeholders();
    let tags = TagResolver::new(Variant::Current, &components, false);
    let mdx = tags.mdx_components();
    assert!(mdx.get("CodeTabs").unwrap().is(&components.code_tabs));
    assert!(mdx.get("Banner").unwrap().is(&components.banner));
    assert!(mdx.get("WithNodeRelease").unwrap().is(&components.with_node_release));

    let tags = TagResolver::new(Variant::Legacy, &components, false);
    let binding = tags.resolve_shortcode("NodeApiVersionLinks").unwrap();
    assert!(binding.is(&components.node_api_version_links));
}

#[test]
fn key_sets_are_exact_per_variant() {
    let components = ComponentSet::placeholders();

    let current = TagResolver::new(Variant::Current, &components, true);
    assert_eq!(
        current.mdx_components().keys().collect::<Vec<_>>(),
        [
            "Banner",
            "CodeTabs",
            "DownloadReleasesTable",
            "HomeDownloadButton",
            "WithNodeRelease",
        ]
    );
    assert_eq!(
        current.html_components().keys().collect::<Vec<_>>(),
        ["a", "blockquote", "pre"]
    );

    let legacy = TagResolver::new(Variant::Legacy, &components, true);
    assert_eq!(
        legacy.mdx_components().keys().collect::<Vec<_>>(),
        [
            "Banner",
            "DownloadReleasesTable",
            "HomeDownloadButton",
            "NodeApiVersionLinks",
        ]
    );
    assert_eq!(
        legacy.html_components().keys().collect::<Vec<_>>(),
        ["a", "blockquote"]
    );
    assert!(legacy.resolve_html("pre").is_none());
}

#[test]
fn repeated_reads_are_identical() {
    let components = ComponentSet::placeholders();
    let tags = TagResolver::new(Variant::Current, &components, true);

    let first: Vec<_> = tags.html_components().iter().map(|(k, b)| (k, b.target().cloned())).collect();
    let second: Vec<_> = tags.html_components().iter().map(|(k, b)| (k, b.target().cloned())).collect();
    assert_eq!(first.len(), second.len());
    for ((k1, t1), (k2, t2)) in first.iter().zip(&second) {
        assert_eq!(k1, k2);
        assert!(Arc::ptr_eq(t1.as_ref().unwrap(), t2.as_ref().unwrap()));
    }

    let a = tags.resolve("Banner").unwrap().render(&Props::new(), "hi");
    let b = tags.resolve("Banner").unwrap().render(&Props::new(), "hi");
    assert_eq!(a, b);
}

#[test]
fn process_wide_table_is_built_once() {
    let first = site_tags();
    let second = site_tags();
    assert!(std::ptr::eq(first, second));
    assert!(first.resolve_html("a").is_some());
    assert!(first.resolve_html("blockquote").is_some());
}

#[test]
fn resolver_is_shareable_across_threads() {
    let tags = Arc::new(TagResolver::new(
        Variant::Current,
        &ComponentSet::placeholders(),
        false,
    ));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tags = Arc::clone(&tags);
            std::thread::spawn(move || {
                tags.resolve_html("blockquote")
                    .unwrap()
                    .render(&Props::new(), &i.to_string())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("<div class=\"highlight-box\">{i}</div>")
        );
    }
}
