//! Test doubles shared by the strategy and authenticator tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use quickcheck::{Arbitrary, Gen};
use secrecy::Secret;
use warden_core::{
    Account, Credential, Event, EventBus, EventPayload, PublishError, Realm, RealmError,
    SharedHandler, Topic, UsernamePasswordToken,
};

pub const STORED_HASH: &str = "$argon2id$v=19$m=65536,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

pub fn credential() -> Credential {
    Credential::parse(STORED_HASH).unwrap()
}

pub fn token(identifier: &str, secret: &str) -> UsernamePasswordToken {
    UsernamePasswordToken::new(identifier, Secret::new(secret.to_string())).unwrap()
}

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Accept,
    UnknownAccount,
    IncorrectCredentials,
}

impl Arbitrary for Outcome {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[
            Outcome::Accept,
            Outcome::UnknownAccount,
            Outcome::IncorrectCredentials,
        ])
        .unwrap()
    }
}

/// Realm returning a fixed outcome and counting how often it was asked.
pub struct ScriptedRealm {
    name: String,
    outcome: Outcome,
    calls: AtomicUsize,
}

impl ScriptedRealm {
    pub fn new(name: &str, outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Realm for ScriptedRealm {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_account(&self, token: &UsernamePasswordToken) -> Result<Account, RealmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let identifier = token.identifier().to_string();
        match self.outcome {
            Outcome::Accept => Ok(Account::new(identifier, credential())
                .with_attribute("realm", self.name.clone())),
            Outcome::UnknownAccount => Err(RealmError::UnknownAccount(identifier)),
            Outcome::IncorrectCredentials => Err(RealmError::IncorrectCredentials(identifier)),
        }
    }
}

pub fn realms(scripted: &[&Arc<ScriptedRealm>]) -> Vec<Arc<dyn Realm>> {
    scripted
        .iter()
        .map(|realm| Arc::clone(*realm) as Arc<dyn Realm>)
        .collect()
}

/// Event bus that remembers everything published to it.
#[derive(Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<Event>>,
    fail_publish: bool,
}

impl RecordingEventBus {
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventBus for RecordingEventBus {
    fn publish(&self, topic: Topic, payload: EventPayload) -> Result<(), PublishError> {
        self.events
            .lock()
            .unwrap()
            .push(Event::new(topic, payload));
        if self.fail_publish {
            return Err(PublishError {
                topic,
                failures: vec!["subscriber exploded".into()],
            });
        }
        Ok(())
    }

    fn subscribe(&self, _topic: Topic, _handler: SharedHandler) -> bool {
        unimplemented!()
    }

    fn unsubscribe(&self, _topic: Topic, _handler: &SharedHandler) -> bool {
        unimplemented!()
    }
}
