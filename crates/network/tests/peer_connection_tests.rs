use neo_network::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::{timeout, Duration};

/// Test peer connection and handshake functionality
#[cfg(test)]
#[allow(dead_code)]
mod peer_connection_tests {
    use super::*;

    /// Mock Neo node that responds to version messages correctly
    struct MockNeoNode {
        listener: TcpListener,
        expected_version: Vec<u8>,
        response_version: Vec<u8>,
        should_respond: bool,
    }

    impl MockNeoNode {
        /// Create a new mock Neo node for testing
        async fn new(port: u16, should_respond: bool) -> Result<Self> {
            let addr = format!("127.0.0.1:{}", port);
            let listener =
                TcpListener::bind(&addr)
.await
.map_err(|e| NetworkError::ConnectionFailed {
                        address: addr.parse().unwrap(),
                        reason: format!("Failed to bind mock server: {}", e),
                    })?;

            // Create expected version message (what we expect to receive)
            let expected_version = create_test_version_message(0x334F454E); // MainNet magic

            // Create response version message (what we send back)
            let response_version = create_mock_node_version_message();

            Ok(Self {
                listener,
                expected_version,
                response_version,
                should_respond,
            })
        }

        /// Run the mock node (accepts one connection)
        async fn run_single_connection(&mut self) -> Result<bool> {
            println!(
                "Mock Neo node listening on {}",
                self.listener.local_addr().unwrap()
            );

            let (mut stream, peer_addr) =
                self.listener
.accept()
.await
.map_err(|e| NetworkError::ConnectionFailed {
                        address: "0.0.0.0:0".parse().unwrap(),
                        reason: format!("Accept failed: {}", e),
                    })?;

            println!("Mock node: Accepted connection from {}", peer_addr);

            // Read the version message from the peer
            let mut buffer = vec![0u8; 1024];
            let bytes_read = timeout(Duration::from_secs(10), stream.read(&mut buffer))
.await
.map_err(|_| NetworkError::HandshakeTimeout {
                    peer: peer_addr,
                    timeout_ms: 10000,
                })?
.map_err(|e| NetworkError::ConnectionFailed {
                    address: peer_addr,
                    reason: format!("Read failed: {}", e),
                })?;

            buffer.truncate(bytes_read);
            println!(
                "Mock node: Received {} bytes: {:02X?}",
                bytes_read,
                &buffer[..bytes_read.min(50)]
            );

            // Validate the received message format
            if bytes_read < 3 {
                return Err(NetworkError::InvalidMessage {
                    peer: peer_addr,
                    message_type: "Version".to_string(),
                    reason: format!("Message too short: {} bytes", bytes_read),
                });
            }

            // Check Neo N3 format: flags (0x00) + command (0x00) + length + payload
            if buffer[0] != 0x00 || buffer[1] != 0x00 {
                return Err(NetworkError::InvalidMessage {
                    peer: peer_addr,
                    message_type: "Version".to_string(),
                    reason: format!("Invalid Neo N3 header: {:02X} {:02X}", buffer[0], buffer[1]),
                });
            }

            let payload_length = buffer[2] as usize;
            if payload_length + 3 != bytes_read {
                return Err(NetworkError::InvalidMessage {
                    peer: peer_addr,
                    message_type: "Version".to_string(),
                    reason: format!(
                        "Length mismatch: expected {}, got {}",
                        payload_length + 3,
                        bytes_read
                    ),
                });
            }

            println!("✅ Mock node: Valid Neo N3 version message received");

            if self.should_respond {
                // Send our version message back
                println!(
                    "Mock node: Sending version response ({} bytes)",
                    self.response_version.len()
                );
                stream
.write_all(&self.response_version)
.await
.map_err(|e| NetworkError::ConnectionFailed {
                        address: peer_addr,
                        reason: format!("Write failed: {}", e),
                    })?;

                // Wait a bit for verack (optional)
                tokio::time::sleep(Duration::from_millis(100)).await;

                // Send verack
                let verack = create_verack_message();
                println!("Mock node: Sending verack ({} bytes)", verack.len());
                stream
.write_all(&verack)
.await
.map_err(|e| NetworkError::ConnectionFailed {
                        address: peer_addr,
                        reason: format!("Verack write failed: {}", e),
                    })?;

                println!("✅ Mock node: Handshake completed successfully");

                // Keep connection alive for a bit
                tokio::time::sleep(Duration::from_secs(1)).await;
            } else {
                println!("Mock node: Configured to not respond (simulating rejection)");
                // Don't respond, just close connection
            }

            Ok(true)
        }
    }

    /// Create a test version message in Neo N3 format
    fn create_test_version_message(magic: u32) -> Vec<u8> {
        let payload = ProtocolMessage::Version {
            version: 0, // Neo N3 protocol version
            services: 1,
            timestamp: 1722433200,
            port: 10333,
            nonce: 0x12345678,
            user_agent: "neo-rs/0.1.0".to_string(),
            start_height: 0,
            relay: true,
        };

        let message = NetworkMessage::new_with_magic(payload, magic);
        message
.to_bytes()
.expect("Failed to serialize test message")
    }

    /// Create a mock Neo node version message
    fn create_mock_node_version_message() -> Vec<u8> {
        let payload = ProtocolMessage::Version {
            version: 0,
            services: 1,
            timestamp: 1722433300,
            port: 10333,
            nonce: 0x87654321,
            user_agent: "NEO:3.8.2".to_string(), // Realistic Neo node user agent
            start_height: 5000000,               // Some realistic height
            relay: true,
        };

        let message = NetworkMessage::new_with_magic(payload, 0x334F454E);
        message
.to_bytes()
.expect("Failed to serialize mock message")
    }

    /// Create a verack message
    fn create_verack_message() -> Vec<u8> {
        let message = NetworkMessage::new_with_magic(ProtocolMessage::Verack, 0x334F454E);
        message.to_bytes().expect("Failed to serialize verack")
    }

    #[tokio::test]
    async fn test_version_message_serialization() {
        let config = NetworkConfig::default();

        let payload = ProtocolMessage::Version {
            version: 0,
            services: 1,
            timestamp: 1722433200,
            port: 10333,
            nonce: 0x12345678,
            user_agent: "neo-rs/0.1.0".to_string(),
            start_height: 0,
            relay: true,
        };

        let message = NetworkMessage::new_with_magic(payload, config.magic);
        let bytes = message.to_bytes().expect("Serialization should succeed");

        println!("Version message: {} bytes", bytes.len());
        println!("First 50 bytes: {:02X?}", &bytes[..bytes.len().min(50)]);

        // Validate Neo N3 format
        assert!(bytes.len() >= 3, "Message too short");
        assert_eq!(bytes[0], 0x00, "Invalid flags");
        assert_eq!(bytes[1], 0x00, "Invalid command for version");

        let payload_length = bytes[2] as usize;
        assert_eq!(payload_length + 3, bytes.len(), "Length field mismatch");

        println!("✅ Version message serialization test passed");
    }

    #[tokio::test]
    async fn test_message_round_trip() {
        let original_payload = ProtocolMessage::Version {
            version: 0,
            services: 1,
            timestamp: 1722433200,
            port: 10333,
            nonce: 0x12345678,
            user_agent: "neo-rs/0.1.0".to_string(),
            start_height: 0,
            relay: true,
        };

        let message = NetworkMessage::new_with_magic(original_payload.clone(), 0x334F454E);
        let bytes = message.to_bytes().expect("Serialization should succeed");

        // Test deserialization
        let deserialized =
            NetworkMessage::from_bytes(&bytes).expect("Deserialization should succeed");

        // Verify round-trip
        assert_eq!(message.header.magic, deserialized.header.magic);
        assert_eq!(message.header.command, deserialized.header.command);
        assert_eq!(message.payload, deserialized.payload);

        println!("✅ Message round-trip test passed");
    }

    #[tokio::test]
    async fn test_peer_connection_with_mock_node() {
        // Start mock Neo node
        let mut mock_node = MockNeoNode::new(18333, true)
.await
.expect("Failed to create mock node");

        let mock_addr = mock_node.listener.local_addr().unwrap();

        // Start mock node in background
        let mock_handle = tokio::spawn(async move { mock_node.run_single_connection().await });

        // Give mock node time to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create peer manager and attempt connection
        let config = NetworkConfig {
            magic: 0x334F454E,
            protocol_version: ProtocolVersion::current(),
            user_agent: "neo-rs/0.1.0".to_string(),
            listen_address: "127.0.0.1:19333".parse().unwrap(),
            p2p_config: P2PConfig::default(),
            rpc_config: None,
            max_peers: 10,
            max_outbound_connections: 5,
            max_inbound_connections: 5,
            connection_timeout: 30,
            handshake_timeout: 10,
            ping_interval: 30,
            enable_relay: true,
            seed_nodes: vec![],
            port: 19333,
            websocket_enabled: false,
            websocket_port: 19334,
        };

        let peer_manager = PeerManager::new(config.clone()).expect("Failed to create peer manager");

        // Attempt to connect to mock node
        println!("Attempting to connect to mock node at {}", mock_addr);

        let result = timeout(
            Duration::from_secs(15),
            std::sync::Arc::new(peer_manager).connect_to_peer(mock_addr),
        )
.await;

        // Wait for mock node to complete
        let mock_result = timeout(Duration::from_secs(10), mock_handle).await;

        match mock_result {
            Ok(Ok(Ok(_))) => println!("✅ Mock node completed successfully"),
            Ok(Ok(Err(e))) => println!("❌ Mock node error: {}", e),
            Ok(Err(e)) => println!("❌ Mock node panic: {:?}", e),
            Err(_) => println!("❌ Mock node timeout"),
        }

        match result {
            Ok(Ok(_)) => {
                println!("✅ Peer connection test passed");
            }
            Ok(Err(e)) => {
                println!("❌ Peer connection failed: {}", e);
                // This might be expected if mock node rejects connection
                // But we should still see proper protocol exchange
            }
            Err(_) => {
                panic!("❌ Peer connection test timed out");
            }
        }
    }

    #[tokio::test]
    async fn test_peer_connection_with_rejecting_mock() {
        // Start mock Neo node that doesn't respond (simulates real Neo node behavior)
        let mut mock_node = MockNeoNode::new(18334, false)
.await
.expect("Failed to create rejecting mock node");

        let mock_addr = mock_node.listener.local_addr().unwrap();

        // Start mock node in background
        let mock_handle = tokio::spawn(async move { mock_node.run_single_connection().await });

        // Give mock node time to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create peer manager
        let config = NetworkConfig::default();
        let peer_manager = PeerManager::new(config).expect("Failed to create peer manager");

        // Attempt to connect to rejecting mock node
        println!("Testing connection to rejecting mock node at {}", mock_addr);

        let result = timeout(
            Duration::from_secs(10),
            std::sync::Arc::new(peer_manager).connect_to_peer(mock_addr),
        )
.await;

        // Wait for mock node
        let _ = timeout(Duration::from_secs(5), mock_handle).await;

        // This should fail, but we should see our message was properly formatted
        match result {
            Ok(Err(_)) => {
                println!("✅ Rejecting mock test passed - connection properly rejected");
            }
            Ok(Ok(_)) => {
                println!("❓ Unexpected success with rejecting mock");
            }
            Err(_) => {
                println!("✅ Rejecting mock test passed - connection timed out as expected");
            }
        }
    }

    #[tokio::test]
    async fn test_multiple_peer_connections() {
        // Test connecting to multiple mock nodes
        let mut handles = vec![];
        let mut addrs = vec![];

        // Start 3 mock nodes
        for i in 0..3 {
            let port = 18335 + i;
            let mut mock_node = MockNeoNode::new(port, true)
.await
.expect("Failed to create mock node");

            let addr = mock_node.listener.local_addr().unwrap();
            addrs.push(addr);

            let handle = tokio::spawn(async move { mock_node.run_single_connection().await });
            handles.push(handle);
        }

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Create peer manager
        let config = NetworkConfig::default();
        let peer_manager = PeerManager::new(config).expect("Failed to create peer manager");

        // Connect to all mock nodes
        let mut connection_results = vec![];
        use std::sync::Arc;
        let peer_manager = Arc::new(peer_manager);
        for addr in addrs {
            let result = timeout(Duration::from_secs(10), peer_manager.connect_to_peer(addr)).await;
            connection_results.push(result);
        }

        // Wait for all mock nodes
        for handle in handles {
            let _ = timeout(Duration::from_secs(5), handle).await;
        }

        // Analyze results
        let successful_connections = connection_results
.iter()
.filter(|r| matches!(r, Ok(Ok(_))))
.count();

        println!("Successful connections: {}/3", successful_connections);

        // We expect at least some connections to work with cooperative mock nodes
        assert!(
            successful_connections > 0,
            "Should have at least one successful connection"
        );

        println!("✅ Multiple peer connections test passed");
    }
}
