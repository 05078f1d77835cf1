//! WinRT host backend.
//!
//! Implements [`HostBackend`] over `Windows.Devices.Radios`,
//! `Windows.Devices.Enumeration`, and `Windows.Devices.Bluetooth`.
//! Completion is delivered through `AsyncOperationCompletedHandler`
//! registrations, matching the one-shot callback contract of the seam; the
//! enumeration collections are exposed through their native
//! has-current/move-next iterators.

use super::{
    Done, DeviceInfoCursor, HostBackend, HostCursor, HostError, RadioCursor, RadioHandle,
    RawDevice, RawDeviceInfo,
};
use std::sync::{Arc, Mutex};
use windows::core::{Ref, HSTRING};
use windows::Devices::Bluetooth::BluetoothDevice;
use windows::Devices::Enumeration::{
    DeviceInformation, DeviceInformationCollection, DevicePairingKinds,
    DevicePairingProtectionLevel, DevicePairingRequestedEventArgs, DevicePairingResult,
    DeviceUnpairingResult,
};
use windows::Devices::Radios::{Radio, RadioAccessStatus, RadioState};
use windows::Foundation::Collections::IIterator;
use windows::Foundation::TypedEventHandler;
use windows_future::{AsyncOperationCompletedHandler, AsyncStatus, IAsyncOperation};

impl From<windows::core::Error> for HostError {
    fn from(err: windows::core::Error) -> Self {
        HostError::with_code(err.message(), err.code().0)
    }
}

/// Hands a [`Done`] callback to exactly one of possibly several completion
/// paths (the completion handler, or the synchronous failure to register it).
struct Settler<T>(Arc<Mutex<Option<Done<T>>>>);

impl<T> Settler<T> {
    fn new(done: Done<T>) -> Self {
        Self(Arc::new(Mutex::new(Some(done))))
    }

    fn settle(&self, outcome: Result<T, HostError>) {
        if let Some(done) = self.0.lock().unwrap().take() {
            done(outcome);
        }
    }
}

impl<T> Clone for Settler<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Register a completion handler on `op` that settles `done` with the
/// converted operation result. A failed operation settles with the error
/// `GetResults` reports for it.
fn complete_with<T, R>(
    op: windows::core::Result<IAsyncOperation<T>>,
    done: Done<R>,
    convert: impl FnOnce(T) -> windows::core::Result<R> + Send + 'static,
) where
    T: windows::core::RuntimeType + 'static,
    R: Send + 'static,
{
    let slot = Arc::new(Mutex::new(Some((done, convert))));
    let handler_slot = Arc::clone(&slot);
    let registered = (|| -> windows::core::Result<()> {
        let op = op?;
        op.SetCompleted(&AsyncOperationCompletedHandler::new(
            move |op: Ref<IAsyncOperation<T>>, _status: AsyncStatus| {
                if let Some((done, convert)) = handler_slot.lock().unwrap().take() {
                    let outcome =
                        (|| -> windows::core::Result<R> { convert(op.ok()?.GetResults()?) })();
                    done(outcome.map_err(HostError::from));
                }
                Ok(())
            },
        ))?;
        Ok(())
    })();
    if let Err(err) = registered {
        if let Some((done, _)) = slot.lock().unwrap().take() {
            done(Err(err.into()));
        }
    }
}

fn raw_info(info: &DeviceInformation) -> windows::core::Result<RawDeviceInfo> {
    let pairing = info.Pairing()?;
    Ok(RawDeviceInfo {
        id: info.Id()?.to_string(),
        name: info.Name()?.to_string(),
        is_paired: pairing.IsPaired()?,
        can_pair: pairing.CanPair()?,
        protection_level: pairing.ProtectionLevel()?.0,
    })
}

fn raw_device(device: &BluetoothDevice) -> windows::core::Result<RawDevice> {
    let class = device.ClassOfDevice()?;
    Ok(RawDevice {
        address: device.BluetoothAddress()?,
        class: (
            class.MajorClass()?.0 as u32,
            class.MinorClass()?.0 as u32,
            class.RawValue()?,
        ),
        connection_status: device.ConnectionStatus()?.0,
        info: raw_info(&device.DeviceInformation()?)?,
    })
}

struct WinrtRadio(Radio);

impl RadioHandle for WinrtRadio {
    fn kind(&self) -> Result<i32, HostError> {
        Ok(self.0.Kind()?.0)
    }

    fn state(&self) -> Result<i32, HostError> {
        Ok(self.0.State()?.0)
    }

    fn request_state(&self, state: i32, done: Done<i32>) {
        complete_with(
            self.0.SetStateAsync(RadioState(state)),
            done,
            |access: RadioAccessStatus| Ok(access.0),
        );
    }
}

struct RadioIter(IIterator<Radio>);

impl HostCursor for RadioIter {
    type Item = Box<dyn RadioHandle>;

    fn has_current(&self) -> bool {
        self.0.HasCurrent().unwrap_or(false)
    }

    fn current(&mut self) -> Result<Self::Item, HostError> {
        Ok(Box::new(WinrtRadio(self.0.Current()?)))
    }

    fn move_next(&mut self) {
        let _ = self.0.MoveNext();
    }
}

struct DeviceInfoIter(IIterator<DeviceInformation>);

impl HostCursor for DeviceInfoIter {
    type Item = RawDeviceInfo;

    fn has_current(&self) -> bool {
        self.0.HasCurrent().unwrap_or(false)
    }

    fn current(&mut self) -> Result<RawDeviceInfo, HostError> {
        Ok(raw_info(&self.0.Current()?)?)
    }

    fn move_next(&mut self) {
        let _ = self.0.MoveNext();
    }
}

/// The production backend over the WinRT Bluetooth surface.
#[derive(Default)]
pub struct WinrtHost;

impl WinrtHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostBackend for WinrtHost {
    fn radios(&self, done: Done<RadioCursor>) {
        complete_with(Radio::GetRadiosAsync(), done, |radios| {
            Ok(Box::new(RadioIter(radios.First()?)) as RadioCursor)
        });
    }

    fn find_devices(&self, selector: &str, done: Done<DeviceInfoCursor>) {
        complete_with(
            DeviceInformation::FindAllAsyncAqsFilter(&HSTRING::from(selector)),
            done,
            |results: DeviceInformationCollection| {
                Ok(Box::new(DeviceInfoIter(results.First()?)) as DeviceInfoCursor)
            },
        );
    }

    fn device_from_id(&self, id: &str, done: Done<RawDevice>) {
        complete_with(
            BluetoothDevice::FromIdAsync(&HSTRING::from(id)),
            done,
            |device| raw_device(&device),
        );
    }

    fn device_from_address(&self, address: u64, done: Done<RawDevice>) {
        complete_with(
            BluetoothDevice::FromBluetoothAddressAsync(address),
            done,
            |device| raw_device(&device),
        );
    }

    fn pair_device(&self, id: &str, kinds: u32, protection: i32, done: Done<i32>) {
        let settler = Settler::new(done);
        let chain_settler = settler.clone();
        let registered = (|| -> windows::core::Result<()> {
            let op = BluetoothDevice::FromIdAsync(&HSTRING::from(id))?;
            op.SetCompleted(&AsyncOperationCompletedHandler::new(
                move |op: Ref<IAsyncOperation<BluetoothDevice>>, _status: AsyncStatus| {
                    let settler = chain_settler.clone();
                    let step = (|| -> windows::core::Result<()> {
                        let device = op.ok()?.GetResults()?;
                        let custom = device.DeviceInformation()?.Pairing()?.Custom()?;
                        // One-shot prompt: accept whatever the ceremony asks.
                        custom.PairingRequested(&TypedEventHandler::new(
                            |_, args: Ref<DevicePairingRequestedEventArgs>| {
                                if let Some(args) = args.as_ref() {
                                    args.Accept()?;
                                }
                                Ok(())
                            },
                        ))?;
                        let pair_op = custom.PairWithProtectionLevelAsync(
                            DevicePairingKinds(kinds),
                            DevicePairingProtectionLevel(protection),
                        )?;
                        let inner = settler.clone();
                        pair_op.SetCompleted(&AsyncOperationCompletedHandler::new(
                            move |op: Ref<IAsyncOperation<DevicePairingResult>>,
                                  _status: AsyncStatus| {
                                let outcome = (|| -> windows::core::Result<i32> {
                                    Ok(op.ok()?.GetResults()?.Status()?.0)
                                })();
                                inner.settle(outcome.map_err(HostError::from));
                                Ok(())
                            },
                        ))?;
                        Ok(())
                    })();
                    if let Err(err) = step {
                        settler.settle(Err(err.into()));
                    }
                    Ok(())
                },
            ))?;
            Ok(())
        })();
        if let Err(err) = registered {
            settler.settle(Err(err.into()));
        }
    }

    fn unpair_device(&self, id: &str, done: Done<i32>) {
        let settler = Settler::new(done);
        let chain_settler = settler.clone();
        let registered = (|| -> windows::core::Result<()> {
            let op = BluetoothDevice::FromIdAsync(&HSTRING::from(id))?;
            op.SetCompleted(&AsyncOperationCompletedHandler::new(
                move |op: Ref<IAsyncOperation<BluetoothDevice>>, _status: AsyncStatus| {
                    let settler = chain_settler.clone();
                    let step = (|| -> windows::core::Result<()> {
                        let device = op.ok()?.GetResults()?;
                        let pairing = device.DeviceInformation()?.Pairing()?;
                        let unpair_op = pairing.UnpairAsync()?;
                        let inner = settler.clone();
                        unpair_op.SetCompleted(&AsyncOperationCompletedHandler::new(
                            move |op: Ref<IAsyncOperation<DeviceUnpairingResult>>,
                                  _status: AsyncStatus| {
                                let outcome = (|| -> windows::core::Result<i32> {
                                    Ok(op.ok()?.GetResults()?.Status()?.0)
                                })();
                                inner.settle(outcome.map_err(HostError::from));
                                Ok(())
                            },
                        ))?;
                        Ok(())
                    })();
                    if let Err(err) = step {
                        settler.settle(Err(err.into()));
                    }
                    Ok(())
                },
            ))?;
            Ok(())
        })();
        if let Err(err) = registered {
            settler.settle(Err(err.into()));
        }
    }

    fn paired_selector(&self) -> Result<String, HostError> {
        Ok(BluetoothDevice::GetDeviceSelectorFromPairingState(true)?.to_string())
    }

    fn unpaired_selector(&self) -> Result<String, HostError> {
        Ok(BluetoothDevice::GetDeviceSelectorFromPairingState(false)?.to_string())
    }
}
