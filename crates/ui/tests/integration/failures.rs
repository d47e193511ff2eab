use pretty_assertions::assert_eq;
use trellis_tree::container::{DEFAULT_COLLAPSE_LABEL, DEFAULT_EXPAND_LABEL};
use trellis_tree::{Node, Path, StalePolicy, StaleShape, TokenDefect, decode, encode};
use trellis_ui::{ActionCallbacks, Error, Interaction, MessageHandle, PostOptions, Response, TreeUiConfig};

use crate::common::{Call, Harness, element, leaves};

fn posted(harness: &Harness) -> (MessageHandle, String) {
	let root = Node::with_side_button("Root", leaves("Leaf", 2), DEFAULT_EXPAND_LABEL, DEFAULT_COLLAPSE_LABEL, 10);
	let response = harness.ui.post_node("C1", root, PostOptions::default()).unwrap();
	let blocks = harness.last_blocks();
	let token = element(&blocks, "expand 2").action_id().to_string();
	(response.message.expect("successful posts carry a handle"), token)
}

#[test]
fn rejected_replacement_posts_one_notice() {
	let harness = Harness::default();
	let (message, token) = posted(&harness);
	harness.transport.reject_replace(Response::failed(403, "denied"));

	let result = harness.ui.dispatch(&Interaction::click(token, message));
	assert!(matches!(
		result,
		Err(Error::TransportFailure { status: 403, body: Some(ref body) }) if body == "denied"
	));
	assert_eq!(harness.transport.notices(), vec!["error in tree interaction handling: denied"]);
	assert!(matches!(
		harness.transport.calls().last(),
		Some(Call::Post { target, .. }) if target == "C1"
	));
}

#[test]
fn rejected_post_posts_one_notice() {
	let harness = Harness::default();
	harness.transport.reject_block_posts(Response::failed(500, "boom"));

	let result = harness.ui.post_node("C2", Node::new("lonely"), PostOptions::default());
	assert!(matches!(result, Err(Error::TransportFailure { status: 500, .. })));
	assert_eq!(harness.transport.notices(), vec!["error in tree posting handling: boom"]);
}

#[test]
fn unknown_root_is_not_found() {
	let harness = Harness::default();
	let (message, _) = posted(&harness);

	let result = harness.ui.dispatch(&Interaction::click("tn@missing^0,0,0", message));
	assert!(matches!(result, Err(Error::NotFound(_))));
	assert!(harness.transport.notices().is_empty());
}

#[test]
fn malformed_tokens_are_rejected() {
	let harness = Harness::default();
	let (message, _) = posted(&harness);

	let result = harness.ui.dispatch(&Interaction::click("tn@nocaret", message.clone()));
	assert!(matches!(
		result,
		Err(Error::Tree(trellis_tree::Error::InvalidToken {
			defect: TokenDefect::MissingSeparator,
			..
		}))
	));

	let result = harness.ui.dispatch(&Interaction::click("rcb_elsewhere", message));
	assert!(matches!(
		result,
		Err(Error::Tree(trellis_tree::Error::InvalidToken {
			defect: TokenDefect::MissingPrefix,
			..
		}))
	));
}

#[test]
fn non_index_selection_is_rejected() {
	let harness = Harness::default();
	let (message, token) = posted(&harness);

	let result = harness.ui.dispatch(&Interaction::select(token, "first", message));
	assert!(matches!(result, Err(Error::InvalidSelection(value)) if value == "first"));
}

#[test]
fn stale_paths_follow_policy() {
	let harness = Harness::default();
	let (message, token) = posted(&harness);
	let (root_key, _) = decode(&token).unwrap();
	let stale = encode(&root_key, &Path::from([0, 3, 0]));

	let reset = harness.ui.dispatch(&Interaction::click(stale.clone(), message.clone())).unwrap();
	assert_eq!(reset.len(), 3);

	let strict = Harness::new(TreeUiConfig {
		stale_paths: StalePolicy::Reject,
		..TreeUiConfig::default()
	});
	let (message, token) = posted(&strict);
	let (root_key, _) = decode(&token).unwrap();
	let stale = encode(&root_key, &Path::from([0, 3, 0]));

	let result = strict.ui.dispatch(&Interaction::click(stale, message));
	assert!(matches!(
		result,
		Err(Error::Tree(trellis_tree::Error::StaleShape {
			shape: StaleShape::Container { index: 3, count: 1 },
			..
		}))
	));
	assert!(strict.transport.calls().iter().all(|call| !matches!(call, Call::Replace { .. })));
}

#[test]
fn invalid_config_is_refused() {
	let config = TreeUiConfig {
		page_size: 0,
		..TreeUiConfig::default()
	};
	let store = std::sync::Arc::new(trellis_store::MemoryStore::new());
	let transport = std::sync::Arc::new(crate::common::RecordingTransport::default());
	assert!(matches!(trellis_ui::TreeUi::new(store, transport, config), Err(Error::Config(_))));
}

#[test]
fn callback_ids_are_not_tree_tokens() {
	let harness = Harness::default();
	let callbacks = ActionCallbacks::from_config(harness.ui.config());
	let button = callbacks.button("go", |_| Ok(()));
	let (_, token) = posted(&harness);

	assert!(callbacks.handles(&button.action_id));
	assert!(!harness.ui.handles(&button.action_id));
	assert!(harness.ui.handles(&token));
	assert!(!callbacks.handles(&token));
}

#[test]
fn rejected_notice_is_not_retried() {
	let harness = Harness::default();
	harness.transport.reject_all_posts(Response::failed(503, "down"));

	let result = harness.ui.post_node("C3", Node::new("lonely"), PostOptions::default());
	assert!(matches!(result, Err(Error::TransportFailure { status: 503, .. })));
	assert_eq!(harness.transport.calls().len(), 2);
	assert_eq!(harness.transport.notices(), vec!["error in tree posting handling: down"]);
}
