/*!
 * The device collection manager.
 *
 * [`Home`] owns an ordered list of devices, builds new ones through a
 * [`DeviceFactory`], runs bulk and scripted operations over the list, and
 * moves the whole list to and from a [`DeviceStore`]. Every user-visible
 * effect goes through the injected [`Notifier`].
 */
use tracing::{debug, info, warn};

use homeflow_core::logging::component_span;
use homeflow_core::types::Id;
use homeflow_devices::{
    Device, DeviceEvent, DeviceFactory, DeviceKind, DeviceParams, DeviceType, Setting,
};

use crate::error::{Error, Result};
use crate::notify::{HomeEvent, Notifier};
use crate::store::DeviceStore;

/// An owned, ordered collection of devices
#[derive(Debug)]
pub struct Home<N> {
    factory: DeviceFactory,
    notifier: N,
    devices: Vec<Device>,
}

impl<N: Notifier> Home<N> {
    /// Create an empty collection
    pub fn new(factory: DeviceFactory, notifier: N) -> Self {
        Self {
            factory,
            notifier,
            devices: Vec::new(),
        }
    }

    /// The factory used for create and load
    pub fn factory(&self) -> &DeviceFactory {
        &self.factory
    }

    /// The injected notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Devices in insertion order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Number of devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Look a device up by identity
    pub fn device(&self, id: &Id) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Look a device up by identity, mutably
    pub fn device_mut(&mut self, id: &Id) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id() == id)
    }

    /// First device with the given name
    ///
    /// Names are not unique; later devices with the same name are shadowed.
    pub fn find_by_name(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    /// First device with the given name, mutably
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.name() == name)
    }

    /// Build a device through the factory and append it
    ///
    /// On failure the collection is left untouched.
    pub fn create(&mut self, tag: &str, name: &str, params: &DeviceParams) -> Result<&Device> {
        let device = self.factory.create(tag, name, params)?;
        info!(device = %name, tag = %tag, "Device added");
        self.notifier.notify(HomeEvent::DeviceAdded {
            name: device.name().to_string(),
        });
        self.devices.push(device);
        Ok(&self.devices[self.devices.len() - 1])
    }

    /// Remove a device by identity
    ///
    /// Returns the removed device, or `None` (and stays silent) when no device
    /// has that identity.
    pub fn delete(&mut self, id: &Id) -> Option<Device> {
        let index = self.devices.iter().position(|d| d.id() == id)?;
        let device = self.devices.remove(index);
        info!(device = %device.name(), "Device removed");
        self.notifier.notify(HomeEvent::DeviceRemoved {
            name: device.name().to_string(),
        });
        Some(device)
    }

    /// Switch every device on, in order
    pub fn turn_on_all(&mut self) {
        for device in self.devices.iter_mut() {
            let event = device.turn_on();
            self.notifier.notify(event.into());
        }
        info!("Turned on {} devices", self.devices.len());
    }

    /// Switch every device off, in order
    pub fn turn_off_all(&mut self) {
        for device in self.devices.iter_mut() {
            let event = device.turn_off();
            self.notifier.notify(event.into());
        }
        info!("Turned off {} devices", self.devices.len());
    }

    /// Emit and return the summary line of every device, in order
    pub fn list_info(&self) -> Vec<String> {
        self.devices
            .iter()
            .map(|device| {
                let line = device.info();
                self.notifier.notify(HomeEvent::DeviceInfo(line.clone()));
                line
            })
            .collect()
    }

    /// Apply the leave-home policy to every device
    ///
    /// Lights, TVs, and air conditioners are switched off, doors are locked,
    /// and cameras are switched on. A single completion event follows the pass.
    pub fn leave_home(&mut self) {
        for device in self.devices.iter_mut() {
            let event = match device.device_type() {
                DeviceType::Light | DeviceType::Tv | DeviceType::AirConditioner => {
                    device.turn_off()
                }
                DeviceType::Door => {
                    if let DeviceKind::Door(door) = device.kind_mut() {
                        door.set_locked(true);
                    }
                    debug!(device = %device.name(), "Door locked");
                    DeviceEvent::SettingChanged {
                        name: device.name().to_string(),
                        setting: Setting::Locked(true),
                    }
                }
                DeviceType::Camera => device.turn_on(),
            };
            self.notifier.notify(event.into());
        }
        info!("Leave-home mode applied to {} devices", self.devices.len());
        self.notifier.notify(HomeEvent::LeaveHomeActivated);
    }

    /// Change one kind-specific parameter of a device
    ///
    /// A refused value (out of range) is reported as an event, not an error.
    pub fn update(&mut self, id: &Id, setting: Setting) -> Result<DeviceEvent> {
        let device = self
            .devices
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| Error::not_found(format!("device {}", id)))?;
        let event = device.apply(setting)?;
        if let DeviceEvent::SettingRejected { name, reason, .. } = &event {
            warn!(device = %name, "Setting rejected: {}", reason);
        }
        self.notifier.notify(event.clone().into());
        Ok(event)
    }

    /// Switch one device on or off
    pub fn set_power(&mut self, id: &Id, on: bool) -> Result<DeviceEvent> {
        let device = self
            .devices
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| Error::not_found(format!("device {}", id)))?;
        let event = device.set_power(on);
        self.notifier.notify(event.clone().into());
        Ok(event)
    }

    /// Write a full snapshot of the collection, replacing the stored one
    pub fn save<S: DeviceStore + ?Sized>(&self, store: &S) -> Result<usize> {
        let location = store.location();
        let _span = component_span("store", Some(location.as_str())).entered();
        let records: Vec<_> = self.devices.iter().map(Device::to_record).collect();
        store.write(&records)?;
        info!("Saved {} devices to {}", records.len(), location);
        self.notifier.notify(HomeEvent::Saved {
            count: records.len(),
            target: location,
        });
        Ok(records.len())
    }

    /// Append every device from the stored snapshot
    ///
    /// A missing snapshot is not an error: nothing is appended and `Ok(0)` is
    /// returned. Existing devices are kept, so loading twice duplicates. If
    /// any record has an unregistered type the whole load fails and nothing
    /// is appended.
    pub fn load<S: DeviceStore + ?Sized>(&mut self, store: &S) -> Result<usize> {
        let location = store.location();
        let _span = component_span("store", Some(location.as_str())).entered();
        let Some(records) = store.read()? else {
            warn!("No saved file at {}", location);
            self.notifier.notify(HomeEvent::NothingToLoad {
                target: location,
            });
            return Ok(0);
        };

        let loaded = records
            .iter()
            .map(|record| self.factory.create_from_record(record))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let count = loaded.len();
        debug!("Rebuilt {} devices", count);
        self.devices.extend(loaded);
        info!("Loaded {} devices from {}", count, location);
        self.notifier.notify(HomeEvent::Loaded {
            count,
            target: location,
        });
        Ok(count)
    }

    /// Add the default household: a TV, a light, an air conditioner, a door,
    /// and a camera
    pub fn seed_demo(&mut self) -> Result<()> {
        self.create(
            "TV",
            "Living Room TV",
            &DeviceParams::new().with("channel", 5).with("volume", 10),
        )?;
        self.create(
            "Light",
            "Kitchen Light",
            &DeviceParams::new().with("brightness", 70),
        )?;
        self.create(
            "AirConditioner",
            "Bedroom AC",
            &DeviceParams::new().with("temperature", 10),
        )?;
        self.create(
            "Door",
            "Front Door",
            &DeviceParams::new().with("locked", false),
        )?;
        self.create(
            "Camera",
            "Security Camera",
            &DeviceParams::new().with("resolution", "1080p"),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::store::{JsonFileStore, MemoryStore};
    use homeflow_devices::devices::{AirConditioner, Camera, Door, Light, Tv};
    use homeflow_devices::{DeviceError, DeviceKind};
    use tempfile::tempdir;

    fn home() -> Home<MemoryNotifier> {
        Home::new(DeviceFactory::with_builtin_types(), MemoryNotifier::new())
    }

    fn demo_home() -> Home<MemoryNotifier> {
        let mut home = home();
        home.seed_demo().unwrap();
        home.notifier().clear();
        home
    }

    fn id_of(home: &Home<MemoryNotifier>, name: &str) -> Id {
        home.find_by_name(name).unwrap().id().clone()
    }

    #[test]
    fn test_create_appends_and_notifies() {
        let mut home = home();
        let device = home
            .create(
                "TV",
                "Samsung TV",
                &DeviceParams::new().with("channel", 1).with("volume", 10),
            )
            .unwrap();
        assert_eq!(device.name(), "Samsung TV");

        assert_eq!(home.len(), 1);
        assert_eq!(
            home.notifier().events(),
            vec![HomeEvent::DeviceAdded {
                name: "Samsung TV".to_string()
            }]
        );
    }

    #[test]
    fn test_create_unknown_type_leaves_collection() {
        let mut home = demo_home();
        let err = home
            .create("Toaster", "Toaster", &DeviceParams::new())
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Device(DeviceError::UnknownDeviceType(ref tag)) if tag == "Toaster"
        ));
        assert_eq!(home.len(), 5);
        assert!(home.notifier().events().is_empty());
    }

    #[test]
    fn test_living_room_tv_scenario() {
        let mut home = home();
        let id = home
            .create(
                "TV",
                "Living Room TV",
                &DeviceParams::new().with("channel", 5).with("volume", 10),
            )
            .unwrap()
            .id()
            .clone();

        home.turn_on_all();

        let tv = home.device(&id).unwrap();
        assert!(tv.is_on());
        assert!(tv.info().contains('5'));
        assert!(tv.info().contains("10"));
    }

    #[test]
    fn test_bulk_power_is_idempotent() {
        let mut home = demo_home();
        home.turn_on_all();
        home.turn_on_all();
        assert!(home.devices().iter().all(Device::is_on));
        assert_eq!(home.notifier().events().len(), 10);

        home.turn_off_all();
        assert!(home.devices().iter().all(|d| !d.is_on()));
    }

    #[test]
    fn test_delete_by_identity() {
        let mut home = home();
        let params = DeviceParams::new().with("brightness", 50);
        let first = home.create("Light", "Lamp", &params).unwrap().id().clone();
        let second = home.create("Light", "Lamp", &params).unwrap().id().clone();
        home.notifier().clear();

        let removed = home.delete(&second).unwrap();
        assert_eq!(removed.id(), &second);
        assert_eq!(home.len(), 1);
        assert_eq!(home.devices()[0].id(), &first);
        assert_eq!(
            home.notifier().events(),
            vec![HomeEvent::DeviceRemoved {
                name: "Lamp".to_string()
            }]
        );

        assert!(home.delete(&second).is_none());
        assert!(home.delete(&Id::new()).is_none());
        assert_eq!(home.len(), 1);
        assert_eq!(home.notifier().events().len(), 1);
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let mut home = home();
        let first = home
            .create("Door", "Door", &DeviceParams::new())
            .unwrap()
            .id()
            .clone();
        home.create("Door", "Door", &DeviceParams::new().with("locked", true))
            .unwrap();

        assert_eq!(home.find_by_name("Door").unwrap().id(), &first);
        assert!(home.find_by_name("Garage").is_none());

        let door = home.find_by_name_mut("Door").unwrap();
        door.turn_on();
        assert!(home.device(&first).unwrap().is_on());
    }

    #[test]
    fn test_list_info_in_order() {
        let home = demo_home();
        let lines = home.list_info();

        assert_eq!(
            lines,
            vec![
                "Living Room TV - Status: OFF, Channel: 5, Volume: 10",
                "Kitchen Light - Status: OFF, Brightness: 70 %",
                "Bedroom AC - Status: OFF, Temperature: 10 C",
                "Front Door - Status: Unlocked",
                "Security Camera - Status: OFF, Resolution: 1080p",
            ]
        );
        assert_eq!(home.notifier().events().len(), 5);
        assert_eq!(
            home.notifier().events()[3],
            HomeEvent::DeviceInfo("Front Door - Status: Unlocked".to_string())
        );
    }

    #[test_log::test]
    fn test_leave_home_policy() {
        let mut home = demo_home();
        home.turn_on_all();
        let camera = id_of(&home, "Security Camera");
        home.set_power(&camera, false).unwrap();
        home.notifier().clear();

        home.leave_home();

        for device in home.devices() {
            match device.kind() {
                DeviceKind::Light(_) | DeviceKind::Tv(_) | DeviceKind::AirConditioner(_) => {
                    assert!(!device.is_on(), "{} should be off", device.name())
                }
                DeviceKind::Door(door) => assert!(door.is_locked()),
                DeviceKind::Camera(_) => assert!(device.is_on()),
            }
        }

        let events = home.notifier().events();
        assert_eq!(events.len(), 6);
        assert_eq!(events.last(), Some(&HomeEvent::LeaveHomeActivated));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == HomeEvent::LeaveHomeActivated)
                .count(),
            1
        );
    }

    #[test]
    fn test_front_door_scenario() {
        let mut home = home();
        let id = home
            .create("Door", "Front Door", &DeviceParams::new().with("locked", false))
            .unwrap()
            .id()
            .clone();

        home.leave_home();

        assert_eq!(
            home.device(&id).unwrap().kind(),
            &DeviceKind::Door(Door::new(true))
        );
    }

    #[test]
    fn test_leave_home_locks_already_locked_door() {
        let mut home = home();
        home.create("Door", "Back Door", &DeviceParams::new().with("locked", true))
            .unwrap();
        home.leave_home();
        assert_eq!(home.devices()[0].kind(), &DeviceKind::Door(Door::new(true)));
    }

    #[test]
    fn test_leave_home_reports_door_lock() {
        let mut home = home();
        home.create("Door", "Front Door", &DeviceParams::new())
            .unwrap();
        home.create("Door", "Back Door", &DeviceParams::new().with("locked", true))
            .unwrap();
        home.notifier().clear();

        home.leave_home();

        let locked = |name: &str| {
            HomeEvent::Device(DeviceEvent::SettingChanged {
                name: name.to_string(),
                setting: Setting::Locked(true),
            })
        };
        assert_eq!(
            home.notifier().events(),
            vec![
                locked("Front Door"),
                locked("Back Door"),
                HomeEvent::LeaveHomeActivated
            ]
        );
        assert!(home.devices().iter().all(|d| d.info().ends_with("Locked")));
    }

    #[test]
    fn test_bedroom_ac_scenario() {
        let mut home = home();
        let id = home
            .create(
                "AirConditioner",
                "Bedroom AC",
                &DeviceParams::new().with("temperature", 10),
            )
            .unwrap()
            .id()
            .clone();

        let event = home.update(&id, Setting::Temperature(50)).unwrap();
        assert!(matches!(event, DeviceEvent::SettingRejected { .. }));
        assert_eq!(
            home.device(&id).unwrap().kind(),
            &DeviceKind::AirConditioner(AirConditioner::new(10))
        );

        home.update(&id, Setting::Temperature(-5)).unwrap();
        assert_eq!(
            home.device(&id).unwrap().kind(),
            &DeviceKind::AirConditioner(AirConditioner::new(-5))
        );
    }

    #[test]
    fn test_update_errors() {
        let mut home = demo_home();
        let light = id_of(&home, "Kitchen Light");

        let err = home.update(&light, Setting::Volume(3)).unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::UnsupportedSetting {
                device_type: DeviceType::Light,
                setting: "volume",
            })
        ));

        let err = home.update(&Id::new(), Setting::Brightness(3)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(home.notifier().events().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut home = demo_home();
        home.turn_on_all();
        let tv = id_of(&home, "Living Room TV");
        home.update(&tv, Setting::Channel(42)).unwrap();
        let door = id_of(&home, "Front Door");
        home.update(&door, Setting::Locked(true)).unwrap();
        let light = id_of(&home, "Kitchen Light");
        home.set_power(&light, false).unwrap();

        let store = MemoryStore::new();
        assert_eq!(home.save(&store).unwrap(), 5);

        let mut restored = self::home();
        assert_eq!(restored.load(&store).unwrap(), 5);

        let expected = vec![
            (DeviceKind::Tv(Tv::new(42, 10)), "Living Room TV", true),
            (DeviceKind::Light(Light::new(70)), "Kitchen Light", false),
            (
                DeviceKind::AirConditioner(AirConditioner::new(10)),
                "Bedroom AC",
                true,
            ),
            (DeviceKind::Door(Door::new(true)), "Front Door", true),
            (
                DeviceKind::Camera(Camera::new("1080p")),
                "Security Camera",
                true,
            ),
        ];
        let actual: Vec<_> = restored
            .devices()
            .iter()
            .map(|d| (d.kind().clone(), d.name(), d.is_on()))
            .collect();
        assert_eq!(actual, expected);

        let saved_ids: Vec<_> = home.devices().iter().map(|d| d.id().clone()).collect();
        assert!(restored
            .devices()
            .iter()
            .all(|d| !saved_ids.contains(d.id())));
    }

    #[test]
    fn test_save_overwrites_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("devices.json"));

        let mut home = demo_home();
        home.save(&store).unwrap();
        let camera = id_of(&home, "Security Camera");
        home.delete(&camera);
        home.save(&store).unwrap();

        let mut restored = self::home();
        assert_eq!(restored.load(&store).unwrap(), 4);
        assert!(restored.find_by_name("Security Camera").is_none());
    }

    #[test]
    fn test_load_missing_file_is_soft() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("devices.json"));

        let mut home = demo_home();
        assert_eq!(home.load(&store).unwrap(), 0);
        assert_eq!(home.len(), 5);
        assert_eq!(
            home.notifier().events(),
            vec![HomeEvent::NothingToLoad {
                target: store.location()
            }]
        );
    }

    #[test]
    fn test_load_appends_and_duplicates() {
        let store = MemoryStore::new();
        demo_home().save(&store).unwrap();

        let mut home = demo_home();
        home.load(&store).unwrap();
        home.load(&store).unwrap();
        assert_eq!(home.len(), 15);
        assert_eq!(home.devices()[5].name(), "Living Room TV");
    }

    #[test]
    fn test_load_unknown_type_aborts() {
        let store = MemoryStore::with_contents(
            r#"[
                {"type": "Light", "name": "Hall", "status": true, "brightness": 20},
                {"type": "Toaster", "name": "Toaster", "status": false}
            ]"#,
        );

        let mut home = demo_home();
        let err = home.load(&store).unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::UnknownDeviceType(ref tag)) if tag == "Toaster"
        ));
        assert_eq!(home.len(), 5);
        assert!(home.find_by_name("Hall").is_none());
    }

    #[test]
    fn test_load_malformed_snapshot() {
        let store = MemoryStore::with_contents(r#"[{"type": "TV", "name": "TV"}]"#);
        let mut home = home();
        assert!(matches!(
            home.load(&store).unwrap_err(),
            Error::Serialization(_)
        ));
        assert!(home.is_empty());
    }
}
