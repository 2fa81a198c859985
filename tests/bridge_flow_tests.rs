//! Integration tests for the bridge step controller using fake collaborators
//!
//! These tests drive full deposit and withdrawal flows through the
//! controller with scripted wallet and messenger fakes, covering the step
//! machine's contract: forward-only steps, the busy window, the
//! expected-chain guard, and local recovery from messenger failures.

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address, ChainId, TxHash};
use op_bridge::testing::{FakeMessenger, FakeMessengerFactory, FakeWallet};
use op_bridge::{
    Action, ActionKind, BridgeController, BridgeError, ChainPair, MessageReceipt, MessageStatus,
    PollingConfig, TransferDirection, WalletProvider,
};

const USER: Address = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
const SEPOLIA_ID: ChainId = NamedChain::Sepolia as ChainId;
const BASE_SEPOLIA_ID: ChainId = NamedChain::BaseSepolia as ChainId;

fn tx(n: u8) -> TxHash {
    TxHash::from([n; 32])
}

/// Route controller diagnostics through the test harness when RUST_LOG is set
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn create_controller(
    wallet: FakeWallet,
    factory: FakeMessengerFactory,
) -> BridgeController<FakeWallet, FakeMessengerFactory> {
    BridgeController::builder()
        .wallet(wallet)
        .messenger_factory(factory)
        .chains(ChainPair::sepolia_base())
        .polling(PollingConfig::devnet())
        .build()
}

#[tokio::test]
async fn test_deposit_happy_path() {
    init_tracing();
    let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(1));
    messenger.set_l2_block(12400);
    messenger.add_receipt(
        tx(1),
        MessageReceipt {
            tx_hash: tx(2),
            block_number: 12407,
        },
    );
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger));

    assert_eq!(
        controller.action().await.unwrap(),
        Action::Bridge(ActionKind::Deposit)
    );
    controller.handle_action().await.unwrap();

    let session = controller.session();
    assert_eq!(session.step(), 1);
    assert!(!session.is_busy());
    assert_eq!(session.l1_tx(), Some(tx(1)));
    assert_eq!(session.l2_tx(), Some(tx(2)));

    // Two entries: submitted (L1 link) and complete (L2 link)
    let logs = session.logs();
    assert_eq!(logs.len(), 2);
    assert_eq!(
        logs[0].message(),
        "Transaction submitted, waiting for confirmation..."
    );
    assert!(logs[0]
        .link()
        .unwrap()
        .as_str()
        .starts_with("https://sepolia.etherscan.io/tx/"));
    assert_eq!(logs[1].message(), "Transaction complete!");
    assert!(logs[1]
        .link()
        .unwrap()
        .as_str()
        .starts_with("https://sepolia.basescan.org/tx/"));

    // Terminal step offers a restart
    assert_eq!(
        controller.action().await.unwrap(),
        Action::Bridge(ActionKind::Restart)
    );
    assert_eq!(ActionKind::Restart.label(), "Restart");
}

#[tokio::test]
async fn test_deposit_failure_recovers_to_same_step() {
    let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission_failure("insufficient funds");
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger));

    let result = controller.handle_action().await;

    assert!(matches!(result.unwrap_err(), BridgeError::Messenger(_)));
    let session = controller.session();
    assert_eq!(session.step(), 0);
    assert!(!session.is_busy());
    assert!(session.logs().is_empty());

    // The same step can be retried
    assert_eq!(
        controller.action().await.unwrap(),
        Action::Bridge(ActionKind::Deposit)
    );
}

#[tokio::test(start_paused = true)]
async fn test_full_withdrawal_flow_step_sequence() {
    init_tracing();
    let wallet = FakeWallet::connected(USER, BASE_SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    // Withdrawal submission, then proof and finalize submissions
    messenger.push_submission(tx(3));
    messenger.push_submission(tx(4));
    messenger.push_submission(tx(5));
    // Status progression across both wait phases
    messenger.add_status_sequence(
        tx(3),
        vec![
            MessageStatus::StateRootNotPublished,
            MessageStatus::ReadyToProve,
            MessageStatus::InChallengePeriod,
            MessageStatus::ReadyForRelay,
            MessageStatus::Relayed,
        ],
    );
    let factory = FakeMessengerFactory::new(messenger.clone());
    let mut controller = create_controller(wallet.clone(), factory.clone());

    controller.flip_networks().unwrap();
    assert_eq!(controller.session().direction(), TransferDirection::L2ToL1);

    let mut observed_steps = vec![controller.session().step()];

    // Step 0: withdraw on L2
    assert_eq!(
        controller.action().await.unwrap(),
        Action::Bridge(ActionKind::Withdraw)
    );
    controller.handle_action().await.unwrap();
    observed_steps.push(controller.session().step());

    // Step 1 expects L1; the wallet must switch before proving
    assert_eq!(
        controller.action().await.unwrap(),
        Action::SwitchNetwork {
            target: NamedChain::Sepolia
        }
    );
    controller.switch_to_expected_chain().await.unwrap();
    assert_eq!(wallet.switch_requests(), vec![SEPOLIA_ID]);

    assert_eq!(
        controller.action().await.unwrap(),
        Action::Bridge(ActionKind::ProveAndFinalize)
    );
    controller.handle_action().await.unwrap();
    observed_steps.push(controller.session().step());

    // Monotonic step sequence, exactly [0, 1, 2]
    assert_eq!(observed_steps, vec![0, 1, 2]);
    assert!(controller.session().is_terminal());

    // Withdraw logged 2 entries, prove-and-finalize 3
    let logs = controller.session().logs();
    assert_eq!(logs.len(), 5);
    assert!(logs[0]
        .link()
        .unwrap()
        .as_str()
        .starts_with("https://sepolia.basescan.org/tx/"));
    assert_eq!(logs[1].message(), "Transaction ready to prove...");
    assert_eq!(logs[2].message(), "Transaction ready to relay...");
    assert_eq!(logs[4].message(), "Transaction complete!");
    assert!(logs[4]
        .link()
        .unwrap()
        .as_str()
        .starts_with("https://sepolia.etherscan.io/tx/"));

    // Finalize transaction hash is recorded on the L1 side
    assert_eq!(controller.session().l1_tx(), Some(tx(5)));

    // Messenger was re-derived when the active chain changed
    assert_eq!(factory.create_count(), 2);
    let identities = factory.created_identities();
    assert_eq!(identities[0].chain_id, BASE_SEPOLIA_ID);
    assert_eq!(identities[1].chain_id, SEPOLIA_ID);
}

#[tokio::test]
async fn test_wrong_chain_offers_switch_and_blocks_action() {
    // Wallet on L2 while the session wants a deposit from L1
    let wallet = FakeWallet::connected(USER, BASE_SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(1));
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger.clone()));

    assert_eq!(
        controller.action().await.unwrap(),
        Action::SwitchNetwork {
            target: NamedChain::Sepolia
        }
    );

    let result = controller.handle_action().await;
    assert!(matches!(
        result.unwrap_err(),
        BridgeError::WrongChain {
            expected,
            actual,
        } if expected == SEPOLIA_ID && actual == BASE_SEPOLIA_ID
    ));
    // Nothing was issued against the messenger
    assert_eq!(messenger.submit_calls(), 0);
    assert!(controller.session().logs().is_empty());
}

#[tokio::test]
async fn test_rejected_chain_switch_leaves_state_untouched() {
    let wallet = FakeWallet::connected(USER, BASE_SEPOLIA_ID);
    wallet.reject_switches();
    let mut controller =
        create_controller(wallet.clone(), FakeMessengerFactory::new(FakeMessenger::new()));

    let result = controller.switch_to_expected_chain().await;

    assert!(matches!(
        result.unwrap_err(),
        BridgeError::SwitchChainFailed { .. }
    ));
    assert_eq!(wallet.chain_id().await.unwrap(), BASE_SEPOLIA_ID);
    assert_eq!(controller.session().step(), 0);
    assert!(!controller.session().is_busy());
    assert!(controller.session().logs().is_empty());
}

#[tokio::test]
async fn test_invalid_amount_rejected_before_submission() {
    let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(1));
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger.clone()));

    controller.set_amount("not-a-number");
    let result = controller.handle_action().await;

    assert!(matches!(
        result.unwrap_err(),
        BridgeError::InvalidAmount { .. }
    ));
    // Rejected before the busy window opened or anything was submitted
    assert!(!controller.session().is_busy());
    assert_eq!(messenger.submit_calls(), 0);
    assert!(controller.session().logs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_status_polling_timeout_leaves_step_unchanged() {
    let wallet = FakeWallet::connected(USER, BASE_SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(3));
    // Output root never published
    messenger.add_status_sequence(tx(3), vec![MessageStatus::StateRootNotPublished]);
    let factory = FakeMessengerFactory::new(messenger.clone());
    let mut controller = BridgeController::builder()
        .wallet(wallet)
        .messenger_factory(factory)
        .chains(ChainPair::sepolia_base())
        .polling(PollingConfig::devnet().with_max_attempts(3))
        .build();
    controller.flip_networks().unwrap();

    let result = controller.handle_action().await;

    assert!(matches!(
        result.unwrap_err(),
        BridgeError::StatusTimeout {
            target: MessageStatus::ReadyToProve,
            ..
        }
    ));
    assert_eq!(messenger.status_calls(tx(3)), 3);
    let session = controller.session();
    assert_eq!(session.step(), 0);
    assert!(!session.is_busy());
    // The submission entry stays; the feed is append-only
    assert_eq!(session.logs().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_message_status_aborts_wait() {
    let wallet = FakeWallet::connected(USER, BASE_SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(6));
    messenger.add_status_sequence(tx(6), vec![MessageStatus::FailedL1ToL2Message]);
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger));
    controller.flip_networks().unwrap();

    let result = controller.handle_action().await;

    assert!(matches!(
        result.unwrap_err(),
        BridgeError::MessageFailed {
            status: MessageStatus::FailedL1ToL2Message
        }
    ));
    assert_eq!(controller.session().step(), 0);
    assert!(!controller.session().is_busy());
}

// The controller's exclusive borrow makes the busy flag unreadable while
// an operation future is being polled; abandoning the future mid-wait is
// the one way to observe the window from outside.
#[tokio::test(start_paused = true)]
async fn test_abandoned_operation_leaves_busy_window_open() {
    let wallet = FakeWallet::connected(USER, BASE_SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(7));
    // Output root never published, so the wait phase never ends
    messenger.add_status_sequence(tx(7), vec![MessageStatus::StateRootNotPublished]);
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger));
    controller.flip_networks().unwrap();

    // Drop the withdrawal future while it is polling for the status
    let abandoned = tokio::time::timeout(
        std::time::Duration::from_millis(10),
        controller.handle_action(),
    )
    .await;
    assert!(abandoned.is_err());

    // The busy window stayed open and the submission entry survived
    let session = controller.session();
    assert!(session.is_busy());
    assert_eq!(session.step(), 0);
    assert_eq!(session.logs().len(), 1);
    assert_eq!(session.l2_tx(), Some(tx(7)));

    // Every action is rejected until the session is reset
    assert!(matches!(
        controller.handle_action().await.unwrap_err(),
        BridgeError::OperationInFlight
    ));
    assert!(matches!(
        controller.flip_networks().unwrap_err(),
        BridgeError::OperationInFlight
    ));

    controller.reset();
    assert!(!controller.session().is_busy());
    assert_eq!(controller.session().direction(), TransferDirection::L1ToL2);
    // Fresh session, wallet still on L2: the next control is a switch
    assert_eq!(
        controller.action().await.unwrap(),
        Action::SwitchNetwork {
            target: NamedChain::Sepolia
        }
    );
}

#[tokio::test]
async fn test_messenger_rederived_on_identity_change() {
    let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
    let factory = FakeMessengerFactory::new(FakeMessenger::new());
    let mut controller = create_controller(wallet.clone(), factory.clone());

    controller.refresh().await.unwrap();
    controller.refresh().await.unwrap();
    // Unchanged identity reuses the cached messenger
    assert_eq!(factory.create_count(), 1);

    wallet.set_chain_id(BASE_SEPOLIA_ID);
    controller.refresh().await.unwrap();
    assert_eq!(factory.create_count(), 2);

    wallet.set_address(Some(Address::ZERO));
    controller.refresh().await.unwrap();
    assert_eq!(factory.create_count(), 3);
}

#[tokio::test]
async fn test_disconnected_wallet_blocks_actions() {
    let wallet = FakeWallet::disconnected(SEPOLIA_ID);
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(FakeMessenger::new()));

    let result = controller.handle_action().await;

    assert!(matches!(
        result.unwrap_err(),
        BridgeError::WalletNotConnected
    ));
}

#[tokio::test]
async fn test_restart_after_deposit_resets_session() {
    let wallet = FakeWallet::connected(USER, SEPOLIA_ID);
    let messenger = FakeMessenger::new();
    messenger.push_submission(tx(1));
    messenger.add_receipt(
        tx(1),
        MessageReceipt {
            tx_hash: tx(2),
            block_number: 12407,
        },
    );
    let mut controller = create_controller(wallet, FakeMessengerFactory::new(messenger));

    controller.set_amount("0.25");
    controller.handle_action().await.unwrap();
    assert_eq!(controller.session().step(), 1);

    // Terminal step: the action restarts the session
    controller.handle_action().await.unwrap();

    let session = controller.session();
    assert_eq!(session.step(), 0);
    assert_eq!(session.direction(), TransferDirection::L1ToL2);
    assert_eq!(session.amount(), op_bridge::DEFAULT_AMOUNT_ETH);
    assert!(session.logs().is_empty());
    assert_eq!(session.l1_tx(), None);
    assert_eq!(session.l2_tx(), None);
}
