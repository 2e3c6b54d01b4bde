#![no_main]

//! Drive random operation sequences through a small page of dialogs and
//! check the scroll lock and focus subscription stay balanced.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shroud_core::dom::{Document, Overflow};
use shroud_core::event::DomEvent;
use shroud_core::notify::DialogEventKind;
use shroud_harness::{HeadlessDocument, mount_dialog_parts};
use shroud_widgets::scroll_lock;
use shroud_widgets::{Dialog, DialogPhase, DialogProps};

#[derive(Debug, Arbitrary)]
enum Step {
    Show(u8),
    Hide(u8),
    SetOpen(u8, bool),
    TransitionEnd(u8, bool),
    Escape(u8),
    OverlayClick(u8),
    CloseClick(u8),
    FocusOutside,
    Settle(u8),
    Dispose(u8),
    CancelNext(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    no_overlay_dismiss: bool,
    steps: Vec<Step>,
}

const DIALOGS: usize = 3;

fuzz_target!(|input: Input| {
    let mut doc = HeadlessDocument::new();
    doc.set_overflow(Overflow::Auto);
    let body = doc.body();
    let outside = doc.create_element(body, "input");

    let mut dialogs: Vec<_> = (0..DIALOGS)
        .map(|_| {
            let parts = mount_dialog_parts(&mut doc, true);
            let mut dialog =
                Dialog::new(DialogProps::new().no_overlay_dismiss(input.no_overlay_dismiss));
            dialog.initialize(parts, &mut doc);
            (dialog, parts)
        })
        .collect();

    for step in input.steps.iter().take(256) {
        match *step {
            Step::Show(i) => {
                dialogs[i as usize % DIALOGS].0.show(&mut doc);
            }
            Step::Hide(i) => {
                dialogs[i as usize % DIALOGS].0.hide(&mut doc);
            }
            Step::SetOpen(i, v) => {
                dialogs[i as usize % DIALOGS].0.set_open(v, &mut doc);
            }
            Step::TransitionEnd(i, opacity) => {
                let property = if opacity { "opacity" } else { "transform" };
                let event = DomEvent::transition_end(dialogs[i as usize % DIALOGS].1.panel, property);
                for (dialog, _) in dialogs.iter_mut() {
                    dialog.handle_event(&event, &mut doc);
                }
            }
            Step::Escape(i) => {
                let (dialog, parts) = &mut dialogs[i as usize % DIALOGS];
                dialog.handle_event(&DomEvent::key(parts.panel, "Escape"), &mut doc);
            }
            Step::OverlayClick(i) => {
                let (dialog, parts) = &mut dialogs[i as usize % DIALOGS];
                dialog.handle_event(&DomEvent::Click { target: parts.overlay }, &mut doc);
            }
            Step::CloseClick(i) => {
                let (dialog, parts) = &mut dialogs[i as usize % DIALOGS];
                if let Some(button) = parts.close_button {
                    dialog.handle_event(&DomEvent::Click { target: button }, &mut doc);
                }
            }
            Step::FocusOutside => {
                doc.focus(outside);
                for (dialog, _) in dialogs.iter_mut() {
                    dialog.handle_event(&DomEvent::FocusIn { target: outside }, &mut doc);
                }
            }
            Step::Settle(i) => {
                dialogs[i as usize % DIALOGS].0.settle(&mut doc);
            }
            Step::Dispose(i) => dialogs[i as usize % DIALOGS].0.dispose(&mut doc),
            Step::CancelNext(i) => {
                let dialog = &mut dialogs[i as usize % DIALOGS].0;
                let mut armed = true;
                dialog.on(DialogEventKind::Show, move |n| {
                    if std::mem::take(&mut armed) {
                        n.prevent_default();
                    }
                });
            }
        }

        let held = dialogs
            .iter()
            .filter(|(d, _)| matches!(d.phase(), DialogPhase::Opening | DialogPhase::Open))
            .count();
        assert_eq!(scroll_lock::lock_count(), held);
        assert_eq!(doc.focus_listener_count(), held);
    }

    for (dialog, _) in dialogs.iter_mut() {
        dialog.dispose(&mut doc);
    }
    assert_eq!(scroll_lock::lock_count(), 0);
    assert_eq!(doc.overflow(), Overflow::Auto);
});
