// file: src/distros/persistent_names.rs
// version: 1.0.0
// guid: c2a7e9d4-1b5f-4e38-b06c-8f3d2a9e7c51

//! Pin interface names to MAC addresses across reboots

use super::tasks::{Task, TaskMap};

pub const UDEV_RULES_PATH: &str = "etc/udev/rules.d/70-persistent-net.rules";
pub const MDEV_CONF_PATH: &str = "etc/mdev.conf";
pub const MACTAB_PATH: &str = "etc/mactab";

const UDEV_RULES: &str = include_str!("templates/udev_persistent_net.rules.j2");
const MDEV_CONF: &str = include_str!("templates/mdev.conf.j2");
const MACTAB: &str = include_str!("templates/mactab.j2");

/// udev rules naming each interface after its MAC
pub fn udev_tasks(tasks: &mut TaskMap) {
    tasks.insert(UDEV_RULES_PATH.to_string(), Task::template(UDEV_RULES));
}

/// mdev configuration plus a mactab keyed by metadata names
pub fn mdev_tasks(tasks: &mut TaskMap) {
    tasks.insert(MDEV_CONF_PATH.to_string(), Task::template(MDEV_CONF).with_mode(0o644));
    tasks.insert(MACTAB_PATH.to_string(), Task::template(MACTAB));
}
