// The run loop: inbound frames and UI activations interleaved

use client::domain::SlotRef;
use client::view::elements::ElementId;
use client::view::ViewEvent;
use client::{ClientEvent, PileId, UiInput};
use client_test_support::frames;
use tokio::sync::mpsc;

use crate::support::mock_server::MockServer;
use crate::support::{test_client, wait_until, WAIT};

#[tokio::test]
async fn drives_a_turn_until_quit() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = MockServer::start().await?;
    let (mut client, view) = test_client(server.url());
    client.open().await?;
    let mut conn = server.next_connection(WAIT).await?;
    conn.recv_event(WAIT).await?;

    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
    let script_view = view.clone();
    let script = async move {
        conn.send(&frames::game_state(&["Scout"], &[], &["Cutter"]))
            .await?;
        conn.send(&frames::choose_action(&[("1", "play Scout")]))
            .await?;
        wait_until(WAIT, || {
            script_view
                .events()
                .iter()
                .any(|e| matches!(e, ViewEvent::Actions(buttons) if !buttons.is_empty()))
        })
        .await?;
        ui_tx.send(UiInput::Activate(ElementId::HandCard(0)))?;
        let played = conn.recv_event(WAIT).await?;

        conn.send(&frames::choose_piles("scrap", &["hand"], 0, 1))
            .await?;
        wait_until(WAIT, || {
            script_view
                .events()
                .iter()
                .any(|e| matches!(e, ViewEvent::Selection { .. }))
        })
        .await?;
        ui_tx.send(UiInput::Activate(ElementId::SelectionCard(SlotRef::new(
            "hand", 0,
        ))))?;
        ui_tx.send(UiInput::Activate(ElementId::SelectionDone))?;
        let scrapped = conn.recv_event(WAIT).await?;

        ui_tx.send(UiInput::Quit)?;
        Ok::<_, Box<dyn std::error::Error>>((played, scrapped))
    };

    let (run, script) = tokio::join!(client.run(&mut ui_rx), script);
    run?;
    let (played, scrapped) = script?;

    assert_eq!(
        played,
        ClientEvent::ChooseAction {
            action: "1".into()
        }
    );
    assert_eq!(
        scrapped,
        ClientEvent::ChoosePiles {
            pile: Some(PileId::from("hand")),
            cards: vec!["Scout".into()],
        }
    );
    assert_eq!(view.last(), Some(ViewEvent::SelectionHidden));
    Ok(())
}

#[tokio::test]
async fn ui_input_closing_ends_the_loop() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = MockServer::start().await?;
    let (mut client, _view) = test_client(server.url());
    client.open().await?;
    let _conn = server.next_connection(WAIT).await?;

    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<UiInput>();
    drop(ui_tx);

    tokio::time::timeout(WAIT, client.run(&mut ui_rx)).await??;
    assert!(client.is_open());
    Ok(())
}
