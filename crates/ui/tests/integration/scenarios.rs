use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_blocks::Block;
use trellis_store::KvStore;
use trellis_tree::build::from_json;
use trellis_tree::container::{DEFAULT_COLLAPSE_LABEL, DEFAULT_EXPAND_LABEL};
use trellis_tree::render::{NEXT_LABEL, PREV_LABEL, REPAGINATED_NOTICE};
use trellis_tree::{ListContainer, MenuContainer, MenuOption, Node, decode};
use trellis_ui::{MessageHandle, PostNodesOptions, PostOptions, ROOT_NAMESPACE, Response, TreeUiConfig};

use crate::common::{Call, Harness, element, leaves, texts};

fn handle(response: &Response) -> MessageHandle {
	response.message.clone().expect("successful posts carry a handle")
}

fn post(harness: &Harness, node: Node, expand_first: bool) -> (MessageHandle, Vec<Block>) {
	let response = harness
		.ui
		.post_node(
			"C1",
			node,
			PostOptions {
				alt_text: None,
				expand_first,
			},
		)
		.unwrap();
	(handle(&response), harness.last_blocks())
}

#[test]
fn side_button_expands_and_collapses() {
	let harness = Harness::default();
	let root = Node::with_side_button("Root", leaves("Leaf", 2), DEFAULT_EXPAND_LABEL, DEFAULT_COLLAPSE_LABEL, 10);
	let (message, posted) = post(&harness, root, false);

	assert_eq!(posted.len(), 1);
	assert_eq!(posted[0].accessory().and_then(|e| e.label()), Some("expand 2"));

	let expanded = harness.click(&message, element(&posted, "expand 2"));
	assert_eq!(texts(&expanded), vec!["Root", "Leaf 0", "Leaf 1"]);
	assert_eq!(expanded[0].accessory().and_then(|e| e.label()), Some("collapse 2"));
	assert_eq!(
		harness.transport.calls().last(),
		Some(&Call::Replace {
			message: message.clone(),
			blocks: expanded.clone(),
		})
	);

	let collapsed = harness.click(&message, element(&expanded, "collapse 2"));
	assert_eq!(collapsed, posted);
}

#[test]
fn paged_children_navigate() {
	let harness = Harness::default();
	let root = Node::with_side_button("Root", leaves("Item", 13), DEFAULT_EXPAND_LABEL, DEFAULT_COLLAPSE_LABEL, 5);
	let (message, first) = post(&harness, root, true);

	assert_eq!(first.len(), 7);
	assert_eq!(texts(&first)[1..], ["Item 0", "Item 1", "Item 2", "Item 3", "Item 4"]);
	assert_eq!(first[6].elements().len(), 1);

	let second = harness.click(&message, element(&first, NEXT_LABEL));
	assert_eq!(second.len(), 7);
	assert_eq!(texts(&second)[1], "Item 5");
	assert_eq!(second[6].elements().len(), 2);

	let third = harness.click(&message, element(&second, NEXT_LABEL));
	assert_eq!(texts(&third)[1..], ["Item 10", "Item 11", "Item 12"]);
	assert_eq!(third[4].elements().len(), 1);

	let back = harness.click(&message, element(&third, PREV_LABEL));
	assert_eq!(back, second);
}

#[test]
fn several_lists_share_a_row() {
	let harness = Harness::default();
	let list = |name: &str, n: usize, page: usize| {
		ListContainer::new(leaves(name, n))
			.with_labels(format!("{name} ({{}})"), format!("hide {name}"))
			.with_page_size(page)
	};
	let root = Node::new("Report")
		.with_container(list("Alpha", 13, 5))
		.with_container(list("Bravo", 10, 5))
		.with_container(list("Charlie", 9, 10));
	let (message, posted) = post(&harness, root, false);

	assert_eq!(posted.len(), 2);
	assert_eq!(posted[1].elements().len(), 3);

	let alpha = harness.click(&message, element(&posted, "Alpha (13)"));
	assert_eq!(alpha.len(), 8);
	let alpha = harness.click(&message, element(&alpha, NEXT_LABEL));
	assert_eq!(alpha.len(), 8);
	let alpha = harness.click(&message, element(&alpha, NEXT_LABEL));
	assert_eq!(alpha.len(), 6);

	let bravo = harness.click(&message, element(&alpha, "Bravo (10)"));
	assert_eq!(bravo.len(), 8);
	assert_eq!(texts(&bravo)[1], "Bravo 0");
	assert!(bravo[1..].iter().all(|block| block.elements().iter().all(|e| e.label() != Some("hide Alpha"))));

	let collapsed = harness.click(&message, element(&bravo, "hide Bravo"));
	assert_eq!(collapsed, posted);

	let charlie = harness.click(&message, element(&collapsed, "Charlie (9)"));
	assert_eq!(charlie.len(), 11);
}

fn menu_options() -> Vec<MenuOption> {
	vec![
		MenuOption::new("One {}", leaves("one", 1)),
		MenuOption::new("Two {}", leaves("two", 2)),
		MenuOption::new("Three", leaves("three", 3)),
	]
}

#[test]
fn select_menu_picks_and_collapses() {
	let harness = Harness::default();
	let root = Node::new("Pick").with_container(MenuContainer::select(menu_options(), Some("choose".into())));
	let (message, posted) = post(&harness, root, false);

	assert_eq!(posted.len(), 1);
	let picker = element(&posted, "One 1");
	assert!(picker.initial_option().is_none());

	let two = harness.pick(&message, picker, "1");
	assert_eq!(texts(&two), vec!["Pick", "two 0", "two 1"]);
	let picker = two[0].accessory().expect("picker stays on the root");
	assert_eq!(picker.initial_option().map(|o| o.label()), Some("Two 2"));
	assert_eq!(picker.options()[0].value, "-1");

	let three = harness.pick(&message, picker, "2");
	assert_eq!(three.len(), 4);

	let collapsed = harness.pick(&message, three[0].accessory().expect("picker"), "-1");
	assert_eq!(collapsed, posted);
}

#[test]
fn overflow_menu_marks_selection() {
	let harness = Harness::default();
	let root = Node::new("More").with_container(MenuContainer::overflow(menu_options()));
	let (message, posted) = post(&harness, root, false);

	let one = harness.pick(&message, element(&posted, "One 1"), "0");
	assert_eq!(texts(&one), vec!["More", "one 0"]);
	let overflow = one[0].accessory().expect("overflow stays on the root");
	assert_eq!(overflow.options()[0].label(), "> One 1");
	assert_eq!(overflow.options()[0].value, "-1");

	let collapsed = harness.pick(&message, overflow, "-1");
	assert_eq!(collapsed, posted);
}

#[test]
fn radio_menu_offers_collapse() {
	let harness = Harness::default();
	let root = Node::new("Choose").with_container(MenuContainer::radio(menu_options()));
	let (message, posted) = post(&harness, root, false);

	let three = harness.pick(&message, element(&posted, "One 1"), "2");
	let radio = three[0].accessory().expect("radio stays on the root");
	assert_eq!(radio.options().last().map(|o| o.label()), Some("(collapse)"));
	assert_eq!(radio.initial_option().map(|o| o.label()), Some("Three"));
}

#[test]
fn json_details_expand_level_by_level() {
	let harness = Harness::default();
	let root = from_json("Payload", &json!({ "a": { "b": 1, "c": 2 }, "z": 1 }), 10, false);
	let (message, posted) = post(&harness, root, false);
	assert_eq!(texts(&posted), vec!["Payload"]);

	let details = harness.click(&message, element(&posted, "details"));
	assert_eq!(texts(&details), vec!["Payload", "• a", "• z: 1"]);

	let nested = harness.click(&message, element(&details, "expand 2"));
	assert_eq!(texts(&nested), vec!["Payload", "• a", "•• b: 1", "•• c: 2", "• z: 1"]);
}

#[test]
fn oversized_pages_are_repaginated() {
	let harness = Harness::default();
	let root = Node::with_side_button("Big", leaves("row", 60), DEFAULT_EXPAND_LABEL, DEFAULT_COLLAPSE_LABEL, 60);
	let (message, posted) = post(&harness, root, true);

	assert_eq!(posted.len(), 50);
	assert_eq!(posted.last().and_then(Block::text), Some(REPAGINATED_NOTICE));

	// Shrunk pages only fit once the window starts at the addressed row.
	let next = harness.click(&message, element(&posted, NEXT_LABEL));
	assert_eq!(next.len(), 16);
	assert_eq!(texts(&next)[1], "row 47");
	assert_eq!(next.last().and_then(Block::text), Some(REPAGINATED_NOTICE));
}

#[test]
fn post_nodes_together_collects_under_header() {
	let harness = Harness::default();
	let responses = harness
		.ui
		.post_nodes(
			"C1",
			leaves("hit", 3),
			PostNodesOptions {
				together: true,
				header: Some("Results".into()),
				..Default::default()
			},
		)
		.unwrap();

	assert_eq!(responses.len(), 1);
	let Some(Call::Post { text, blocks, .. }) = harness.transport.calls().pop() else {
		panic!("expected one post");
	};
	assert_eq!(text, "Results: (3) hit 0");
	assert_eq!(texts(&blocks), vec!["Results", "hit 0", "hit 1", "hit 2"]);
}

#[test]
fn post_nodes_separately_posts_header_first() {
	let harness = Harness::default();
	let responses = harness
		.ui
		.post_nodes(
			"C1",
			leaves("hit", 2),
			PostNodesOptions {
				header: Some("Results".into()),
				..Default::default()
			},
		)
		.unwrap();

	assert_eq!(responses.len(), 3);
	assert_eq!(harness.transport.notices(), vec!["Results"]);
	let posted: Vec<String> = harness
		.transport
		.calls()
		.into_iter()
		.filter_map(|call| match call {
			Call::Post { text, blocks, .. } if !blocks.is_empty() => Some(text),
			_ => None,
		})
		.collect();
	assert_eq!(posted, vec!["hit 0", "hit 1"]);
}

#[test]
fn post_nodes_without_nodes() {
	let harness = Harness::default();
	let options = PostNodesOptions {
		message_if_none: Some("nothing found".into()),
		..Default::default()
	};
	assert_eq!(harness.ui.post_nodes("C1", Vec::new(), options).unwrap().len(), 1);
	assert_eq!(harness.transport.notices(), vec!["nothing found"]);

	assert!(harness.ui.post_nodes("C1", Vec::new(), PostNodesOptions::default()).unwrap().is_empty());
	assert_eq!(harness.transport.calls().len(), 1);
}

#[test]
fn roots_persist_under_namespace() {
	let harness = Harness::default();
	let root = Node::with_side_button("Root", leaves("Leaf", 2), DEFAULT_EXPAND_LABEL, DEFAULT_COLLAPSE_LABEL, 10);
	let (message, posted) = post(&harness, root, false);

	let button = element(&posted, "expand 2");
	let (root_key, _) = decode(button.action_id()).unwrap();
	assert_eq!(harness.store.len(), 1);
	assert!(harness.store.contains(&format!("{ROOT_NAMESPACE}{root_key}")).unwrap());

	harness.ui.registry().cache().remove(root_key.as_str());
	assert_eq!(harness.click(&message, button).len(), 3);
}

#[test]
fn uncached_roots_load_from_store() {
	let harness = Harness::new(TreeUiConfig {
		cache_ttl_secs: 0,
		..TreeUiConfig::default()
	});
	let root = Node::with_side_button("Root", leaves("Leaf", 4), DEFAULT_EXPAND_LABEL, DEFAULT_COLLAPSE_LABEL, 10);
	let (message, posted) = post(&harness, root, false);

	assert_eq!(harness.click(&message, element(&posted, "expand 4")).len(), 5);
}

#[test]
fn menu_option_pages_through_dispatch() {
	let harness = Harness::default();
	let options = vec![MenuOption::new("One {}", leaves("one", 1)), MenuOption::new("Many {}", leaves("many", 13))];
	let root = Node::new("Pick").with_container(MenuContainer::select(options, None).with_page_size(5));
	let (message, posted) = post(&harness, root, false);

	let first = harness.pick(&message, element(&posted, "One 1"), "1");
	assert_eq!(first.len(), 7);
	let next = element(&first, NEXT_LABEL);
	assert_eq!(decode(next.action_id()).unwrap().1.to_string(), "0,0,1,5");

	let second = harness.click(&message, next);
	assert_eq!(texts(&second)[1..], ["many 5", "many 6", "many 7", "many 8", "many 9"]);
	let picker = second[0].accessory().expect("picker stays on the root");
	assert_eq!(picker.initial_option().map(|o| o.label()), Some("Many 13"));
}
