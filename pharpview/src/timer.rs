use anyhow::Result;
use crossterm::event::{self, Event as CEvent};
use std::time::{Duration, Instant};
use crate::app::Event;

#[allow(unused_imports)]
use tracing::{debug, warn};

/// Forward terminal input as it arrives and send a tick every `tick_rate`
pub fn main(tx_event: flume::Sender<Event<CEvent>>, tick_rate: Duration) -> Result<()> {
    let _ = std::thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            // poll for tick rate duration, if no events, send tick event
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));
            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(ev @ (CEvent::Key(_) | CEvent::Mouse(_) | CEvent::Resize(..))) => {
                        if tx_event.send(Event::Input(ev)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("terminal read failed: {}", e),
                },
                Ok(false) => {}
                Err(e) => warn!("terminal poll failed: {}", e),
            }
            if last_tick.elapsed() >= tick_rate {
                if tx_event.send(Event::Tick).is_err() {
                    debug!("event receiver gone, input thread stopping");
                    break;
                }
                last_tick = Instant::now();
            }
        }
    });
    Ok(())
}
