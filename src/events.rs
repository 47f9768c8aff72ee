use crate::config;
use std::io;
use std::sync::mpsc;
use std::thread;

use nix::sys::signal;
use unsegen::input::Input;

use config::Config;

pub enum Event {
    Input(Input),
    Update,
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
    _signal_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    /// Spawns the input, tick and signal threads. `signals_to_wait` are
    /// blocked for the calling thread (and every thread spawned afterwards)
    /// and turned into [`Event::Update`].
    pub fn from_config(config: &Config, signals_to_wait: signal::SigSet) -> Dispatcher {
        let tick_rate = config.tick_rate();
        let (tx, rx) = mpsc::channel();

        if let Err(err) = signals_to_wait.thread_block() {
            log::warn!("Could not block signals: {}", err);
        }

        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(key) => {
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                        }
                        Err(err) => log::warn!("Could not read input: {}", err),
                    }
                }
            })
        };

        let update_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };

        let signal_handle = {
            thread::spawn(move || loop {
                match signals_to_wait.wait() {
                    Ok(sig) => {
                        log::debug!("Received {:?}", sig);
                        if tx.send(Event::Update).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        log::warn!("Stopped waiting for signals: {}", err);
                        return;
                    }
                }
            })
        };

        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
            _signal_handle: signal_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
