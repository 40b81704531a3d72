// src/utils/registry.rs

use std::{borrow::Cow, fmt};

#[cfg(windows)]
pub use self::win::*;

/// Enumeration of supported registry key value types.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RegistryKeyValue {
    Dword(u32),
    Qword(u64),
    Binary(Vec<u8>),
    String(Cow<'static, str>),
    ExpandString(Cow<'static, str>),
    MultiString(Vec<String>),
    Deleted, // the value should not exist
}

impl fmt::Display for RegistryKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKeyValue::Dword(v) => write!(f, "Dword({})", v),
            RegistryKeyValue::Qword(v) => write!(f, "Qword({})", v),
            RegistryKeyValue::Binary(v) => write!(f, "Binary({:?})", v),
            RegistryKeyValue::String(v) => write!(f, "String({})", v),
            RegistryKeyValue::ExpandString(v) => write!(f, "ExpandString({})", v),
            RegistryKeyValue::MultiString(v) => write!(f, "MultiString({:?})", v),
            RegistryKeyValue::Deleted => write!(f, "None"),
        }
    }
}

/// Decodes little-endian UTF-16 registry string data, dropping the terminator.
pub fn decode_reg_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();
    String::from_utf16_lossy(&units)
        .trim_end_matches('\0')
        .to_string()
}

/// Encodes a string as NUL-terminated little-endian UTF-16.
pub fn encode_reg_string(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(|c| c.to_le_bytes())
        .collect()
}

/// Decodes `REG_MULTI_SZ` data: NUL-separated strings ending in an empty one.
pub fn decode_reg_multi_string(bytes: &[u8]) -> Vec<String> {
    decode_reg_string(bytes)
        .split('\0')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn encode_reg_multi_string(parts: &[String]) -> Vec<u8> {
    let mut bytes: Vec<u8> = parts.iter().flat_map(|part| encode_reg_string(part)).collect();
    bytes.extend_from_slice(&[0, 0]);
    bytes
}

/// Splits a full registry path into its hive name and subkey path.
///
/// Accepts the long hive names only (e.g. "HKEY_LOCAL_MACHINE\\Software\\...").
pub fn split_registry_path(path: &str) -> anyhow::Result<(&str, &str)> {
    let (hive, subkey) = path.split_once('\\').ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid registry path: '{}'. Expected format 'HKEY_*\\Subkey\\...'",
            path
        )
    })?;
    if subkey.is_empty() {
        anyhow::bail!("Invalid registry path: '{}'. Missing subkey", path);
    }
    match hive.to_uppercase().as_str() {
        "HKEY_LOCAL_MACHINE" | "HKEY_CURRENT_USER" | "HKEY_CLASSES_ROOT" | "HKEY_USERS"
        | "HKEY_CURRENT_CONFIG" => Ok((hive, subkey)),
        other => anyhow::bail!("Unsupported registry hive: '{}'", other),
    }
}

#[cfg(windows)]
mod win {
    use std::{borrow::Cow, io::ErrorKind};

    use anyhow::{Context, Result};
    use winreg::{
        enums::{
            RegType::{REG_BINARY, REG_DWORD, REG_EXPAND_SZ, REG_MULTI_SZ, REG_QWORD, REG_SZ},
            HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE,
            HKEY_USERS, KEY_READ, KEY_WRITE,
        },
        RegKey, RegValue,
    };

    use super::{
        decode_reg_multi_string, decode_reg_string, encode_reg_multi_string, encode_reg_string,
        split_registry_path, RegistryKeyValue,
    };

    /// Reads a registry value from the specified path and key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(RegistryKeyValue))` if the value exists.
    /// - `Ok(None)` if the value or its key doesn't exist.
    /// - `Err(anyhow::Error)` if an error occurs.
    pub fn read_registry_value(path: &str, key_name: &str) -> Result<Option<RegistryKeyValue>> {
        let (hive, subkey_path) = open_hive(path)?;

        let subkey = match hive.open_subkey_with_flags(subkey_path, KEY_READ) {
            Ok(key) => key,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open subkey '{}'", subkey_path))
            }
        };

        get_registry_key_value(&subkey, key_name)
    }

    /// Creates or modifies a registry value at the specified path,
    /// ensuring that all intermediate keys exist.
    pub fn create_or_modify_registry_value(
        path: &str,
        key_name: &str,
        value: &RegistryKeyValue,
    ) -> Result<()> {
        if *value == RegistryKeyValue::Deleted {
            return delete_registry_value(path, key_name);
        }

        let (hive, subkey_path) = open_hive(path)?;

        // create_subkey creates all intermediate subkeys if they don't exist
        let (key, _) = hive
            .create_subkey(subkey_path)
            .with_context(|| format!("Failed to create or open subkey '{}'", subkey_path))?;

        set_registry_key_value(&key, key_name, value).with_context(|| {
            format!(
                "Failed to set registry value '{}' in path '{}'",
                key_name, path
            )
        })
    }

    /// Deletes a registry value. A missing value or key counts as success.
    pub fn delete_registry_value(path: &str, key_name: &str) -> Result<()> {
        let (hive, subkey_path) = open_hive(path)?;

        let subkey = match hive.open_subkey_with_flags(subkey_path, KEY_WRITE) {
            Ok(key) => key,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open subkey '{}'", subkey_path))
            }
        };

        match subkey.delete_value(key_name) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to delete registry entry '{}' in '{}': {}",
                key_name,
                subkey_path,
                e
            )),
        }
    }

    /// Deletes a registry key with all of its subkeys. A missing key counts as success.
    pub fn delete_registry_key(path: &str) -> Result<()> {
        let (hive, subkey_path) = open_hive(path)?;
        match hive.delete_subkey_all(subkey_path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to delete registry key '{}': {}",
                path,
                e
            )),
        }
    }

    fn open_hive(path: &str) -> Result<(RegKey, &str)> {
        let (hive_name, subkey_path) = split_registry_path(path)
            .with_context(|| format!("Failed to parse registry path '{}'", path))?;
        let hive = match hive_name.to_uppercase().as_str() {
            "HKEY_LOCAL_MACHINE" => HKEY_LOCAL_MACHINE,
            "HKEY_CURRENT_USER" => HKEY_CURRENT_USER,
            "HKEY_CLASSES_ROOT" => HKEY_CLASSES_ROOT,
            "HKEY_USERS" => HKEY_USERS,
            _ => HKEY_CURRENT_CONFIG,
        };
        Ok((RegKey::predef(hive), subkey_path))
    }

    fn get_registry_key_value(key: &RegKey, value_name: &str) -> Result<Option<RegistryKeyValue>> {
        match key.get_raw_value(value_name) {
            Ok(value) => match value.vtype {
                REG_DWORD => {
                    if value.bytes.len() >= 4 {
                        let dword = u32::from_le_bytes([
                            value.bytes[0],
                            value.bytes[1],
                            value.bytes[2],
                            value.bytes[3],
                        ]);
                        Ok(Some(RegistryKeyValue::Dword(dword)))
                    } else {
                        anyhow::bail!("REG_DWORD data too small for key '{}'", value_name);
                    }
                }

                REG_QWORD => {
                    let bytes: [u8; 8] = value
                        .bytes
                        .get(..8)
                        .and_then(|b| b.try_into().ok())
                        .ok_or_else(|| {
                            anyhow::anyhow!("REG_QWORD data too small for key '{}'", value_name)
                        })?;
                    Ok(Some(RegistryKeyValue::Qword(u64::from_le_bytes(bytes))))
                }

                REG_BINARY => Ok(Some(RegistryKeyValue::Binary(value.bytes.clone()))),

                REG_SZ => Ok(Some(RegistryKeyValue::String(Cow::Owned(decode_reg_string(
                    &value.bytes,
                ))))),

                REG_EXPAND_SZ => Ok(Some(RegistryKeyValue::ExpandString(Cow::Owned(
                    decode_reg_string(&value.bytes),
                )))),

                REG_MULTI_SZ => Ok(Some(RegistryKeyValue::MultiString(
                    decode_reg_multi_string(&value.bytes),
                ))),

                _ => anyhow::bail!("Unsupported registry value type: {:?}", value.vtype),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!(
                "Failed to read value '{}': {}",
                value_name,
                e
            )),
        }
    }

    fn set_registry_key_value(key: &RegKey, value_name: &str, value: &RegistryKeyValue) -> Result<()> {
        match value {
            RegistryKeyValue::Dword(v) => key
                .set_value(value_name, v)
                .with_context(|| format!("Failed to set DWORD value '{}' to '{}'", value_name, v)),
            RegistryKeyValue::Binary(data) => key
                .set_raw_value(
                    value_name,
                    &RegValue {
                        bytes: data.clone(),
                        vtype: REG_BINARY,
                    },
                )
                .with_context(|| {
                    format!(
                        "Failed to set Binary value '{}' to '{:?}'",
                        value_name, data
                    )
                }),
            RegistryKeyValue::Qword(v) => key
                .set_value(value_name, v)
                .with_context(|| format!("Failed to set QWORD value '{}' to '{}'", value_name, v)),
            RegistryKeyValue::String(s) => key
                .set_raw_value(
                    value_name,
                    &RegValue {
                        bytes: encode_reg_string(s),
                        vtype: REG_SZ,
                    },
                )
                .with_context(|| format!("Failed to set String value '{}' to '{}'", value_name, s)),
            RegistryKeyValue::ExpandString(s) => key
                .set_raw_value(
                    value_name,
                    &RegValue {
                        bytes: encode_reg_string(s),
                        vtype: REG_EXPAND_SZ,
                    },
                )
                .with_context(|| {
                    format!("Failed to set ExpandString value '{}' to '{}'", value_name, s)
                }),
            RegistryKeyValue::MultiString(parts) => key
                .set_raw_value(
                    value_name,
                    &RegValue {
                        bytes: encode_reg_multi_string(parts),
                        vtype: REG_MULTI_SZ,
                    },
                )
                .with_context(|| {
                    format!("Failed to set MultiString value '{}' to '{:?}'", value_name, parts)
                }),
            RegistryKeyValue::Deleted => match key.delete_value(value_name) {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(anyhow::anyhow!(
                    "Failed to delete value '{}': {}",
                    value_name,
                    e
                )),
            },
        }
    }

    #[cfg(test)]
    mod tests {
        use std::sync::Mutex;

        use lazy_static::lazy_static;

        use super::*;

        lazy_static! {
            static ref TEST_MUTEX: Mutex<()> = Mutex::new(());
        }

        const TEST_PATH: &str = "HKEY_CURRENT_USER\\Software\\TuneXRegistryTest";

        #[test]
        fn test_create_read_delete_dword() {
            let _lock = TEST_MUTEX.lock().unwrap();
            let key_name = "TestDword";
            let value = RegistryKeyValue::Dword(42);

            let _ = delete_registry_value(TEST_PATH, key_name);
            create_or_modify_registry_value(TEST_PATH, key_name, &value).unwrap();
            assert_eq!(read_registry_value(TEST_PATH, key_name).unwrap(), Some(value));

            create_or_modify_registry_value(TEST_PATH, key_name, &RegistryKeyValue::Deleted)
                .unwrap();
            assert_eq!(read_registry_value(TEST_PATH, key_name).unwrap(), None);
        }

        #[test]
        fn test_string_round_trip_strips_terminator() {
            let _lock = TEST_MUTEX.lock().unwrap();
            let key_name = "TestString";
            let value = RegistryKeyValue::String(Cow::Borrowed("400"));

            create_or_modify_registry_value(TEST_PATH, key_name, &value).unwrap();
            assert_eq!(read_registry_value(TEST_PATH, key_name).unwrap(), Some(value));
            delete_registry_value(TEST_PATH, key_name).unwrap();
        }

        #[test]
        fn test_wide_value_types_round_trip() {
            let _lock = TEST_MUTEX.lock().unwrap();
            let values = [
                ("TestQword", RegistryKeyValue::Qword(1 << 40)),
                (
                    "TestExpand",
                    RegistryKeyValue::ExpandString(Cow::Borrowed("%SystemRoot%\\Temp")),
                ),
                (
                    "TestMulti",
                    RegistryKeyValue::MultiString(vec!["a".to_string(), "bc".to_string()]),
                ),
            ];
            for (key_name, value) in values {
                create_or_modify_registry_value(TEST_PATH, key_name, &value).unwrap();
                assert_eq!(read_registry_value(TEST_PATH, key_name).unwrap(), Some(value));
                delete_registry_value(TEST_PATH, key_name).unwrap();
            }
        }

        #[test]
        fn test_missing_key_reads_as_none() {
            let _lock = TEST_MUTEX.lock().unwrap();
            let path = "HKEY_CURRENT_USER\\Software\\TuneXRegistryTest\\DoesNotExist";
            assert_eq!(read_registry_value(path, "Anything").unwrap(), None);
            delete_registry_value(path, "Anything").unwrap();
            delete_registry_key(path).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_registry_paths() {
        let invalid_paths = vec![
            "",
            "INVALID_HIVE\\Software",
            "HKEY_UNKNOWN\\Software",
            "HKEY_CURRENT_USER", // Missing subkey
            "HKEY_CURRENT_USER\\",
        ];

        for path in invalid_paths {
            assert!(
                split_registry_path(path).is_err(),
                "Path '{}' should be invalid",
                path
            );
        }
    }

    #[test]
    fn test_multi_string_encoding() {
        let parts = vec!["First".to_string(), "Second".to_string()];
        let bytes = encode_reg_multi_string(&parts);
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
        assert_eq!(decode_reg_multi_string(&bytes), parts);
        assert!(decode_reg_multi_string(&[0, 0]).is_empty());
    }

    #[test]
    fn test_string_decoding_drops_terminator() {
        assert_eq!(decode_reg_string(&encode_reg_string("400")), "400");
    }

    #[test]
    fn test_split_registry_path() {
        let (hive, subkey) =
            split_registry_path("HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control").unwrap();
        assert_eq!(hive, "HKEY_LOCAL_MACHINE");
        assert_eq!(subkey, "SYSTEM\\CurrentControlSet\\Control");
    }
}
