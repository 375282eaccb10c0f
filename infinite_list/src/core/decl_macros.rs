/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

/// A wrapper for `pretty_assertions::assert_eq!` macro.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Send a signal to the host's main context without blocking the caller. The three
/// things to pass in this macro are:
/// 1. [`tokio::runtime::Handle`] to spawn the send on.
/// 2. Sender ([`tokio::sync::mpsc::Sender`]).
/// 3. Signal to put on the MPSC channel.
///
/// Note: the send is wrapped in a spawned task so that it doesn't block the calling
/// thread when the channel is full. More info:
/// <https://tokio.rs/tokio/tutorial/channels>.
#[macro_export]
macro_rules! send_signal {
    (
        $runtime_handle : expr,
        $channel_sender : expr,
        $signal : expr
    ) => {{
        let sender_clone = $channel_sender.clone();
        let signal = $signal;
        $runtime_handle.spawn(async move {
            let _ = sender_clone.send(signal).await;
        });
    }};
}
